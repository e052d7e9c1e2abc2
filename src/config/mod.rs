#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::chart::DEFAULT_CHART_WIDTH;
use crate::core::calculator::ZeroRatePolicy;
use crate::core::validator::InputValidator;
use crate::core::{FallbackTable, LoanField, LoanForm};
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_range, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const MIN_CHART_WIDTH: usize = 10;
pub const MAX_CHART_WIDTH: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["text", "json"];
}

/// Settings after merging the config file and command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub form: LoanForm,
    pub fallbacks: FallbackTable,
    pub zero_rate: ZeroRatePolicy,
    pub format: OutputFormat,
    pub chart: bool,
    pub chart_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fallbacks = FallbackTable::default();
        Self {
            form: LoanForm::from(&fallbacks),
            fallbacks,
            zero_rate: ZeroRatePolicy::default(),
            format: OutputFormat::default(),
            chart: true,
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }
}

impl AppConfig {
    /// Fields absent from `[inputs]` start at their fallback value.
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        let fallbacks = config.defaults.clone().unwrap_or_default();
        let mut form = LoanForm::from(&fallbacks);
        if let Some(inputs) = &config.inputs {
            let given = [
                (LoanField::Principal, &inputs.principal),
                (LoanField::AnnualRate, &inputs.rate),
                (LoanField::Tenure, &inputs.tenure),
            ];
            for (field, value) in given {
                if let Some(value) = value {
                    form.set(field, value.as_str());
                }
            }
        }

        let zero_rate = match config.zero_rate() {
            Some(name) => parse_zero_rate(name)?,
            None => ZeroRatePolicy::default(),
        };
        let format = match config.format() {
            Some(name) => parse_format(name)?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            form,
            fallbacks,
            zero_rate,
            format,
            chart: config.chart_enabled().unwrap_or(true),
            chart_width: config.chart_width().unwrap_or(DEFAULT_CHART_WIDTH),
        })
    }

    pub fn build_validator(&self) -> Result<InputValidator> {
        InputValidator::new(self.fallbacks.clone())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.build_validator()?;
        validate_range(
            "display.chart_width",
            self.chart_width,
            MIN_CHART_WIDTH,
            MAX_CHART_WIDTH,
        )
    }
}

fn parse_zero_rate(name: &str) -> Result<ZeroRatePolicy> {
    validate_one_of("calculation.zero_rate", name, &ZeroRatePolicy::NAMES)?;
    Ok(match name {
        "compat" => ZeroRatePolicy::Compat,
        _ => ZeroRatePolicy::Linear,
    })
}

fn parse_format(name: &str) -> Result<OutputFormat> {
    validate_one_of("display.format", name, &OutputFormat::NAMES)?;
    Ok(match name {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    })
}
