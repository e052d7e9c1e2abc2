// Domain layer: loan models and presentation ports. No I/O here.

pub mod model;
pub mod ports;
