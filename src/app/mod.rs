// Application layer: drives the engine from a trigger source.

pub mod session;
