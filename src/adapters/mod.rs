// Adapters layer: concrete presentation sinks for the terminal and JSON output.

pub mod chart;
pub mod display;

pub use chart::{AsciiPieChart, JsonChart, NoChart, PieHandle};
pub use display::{JsonReport, TextDisplay};
