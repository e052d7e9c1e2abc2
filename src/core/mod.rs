pub mod calculator;
pub mod engine;
pub mod validator;

pub use crate::domain::model::{
    ChartState, EmiBreakdown, FallbackTable, LoanField, LoanForm, LoanTerms, PieSeries,
};
pub use crate::domain::ports::{ChartRenderer, DisplaySink};
pub use crate::utils::error::Result;
