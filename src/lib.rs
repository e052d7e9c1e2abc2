pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{AppConfig, OutputFormat};
pub use crate::core::calculator::{compute, ZeroRatePolicy};
pub use crate::core::engine::{EmiEngine, RunOutcome};
pub use crate::core::validator::InputValidator;
pub use crate::domain::model::{EmiBreakdown, FallbackTable, LoanField, LoanForm, LoanTerms, PieSeries};
pub use crate::utils::error::{EmiError, Result};
