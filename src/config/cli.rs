use crate::config::toml_config::TomlConfig;
use crate::config::{AppConfig, OutputFormat};
use crate::core::calculator::ZeroRatePolicy;
use crate::core::LoanField;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "emi-calc")]
#[command(about = "Loan EMI calculator with a principal/interest breakdown")]
pub struct CliConfig {
    /// Loan amount, whole number (invalid text falls back to the default)
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<String>,

    /// Annual interest rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<String>,

    /// Tenure in months, whole number
    #[arg(long, allow_hyphen_values = true)]
    pub tenure: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// How to compute the installment when the rate is zero
    #[arg(long, value_enum)]
    pub zero_rate: Option<ZeroRatePolicy>,

    /// Do not draw the principal/interest chart
    #[arg(long)]
    pub no_chart: bool,

    /// Width of the chart bar in characters
    #[arg(long)]
    pub chart_width: Option<usize>,

    /// Read commands from stdin and recalculate on request
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Write log lines as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                AppConfig::from_toml(&TomlConfig::from_file(path)?)?
            }
            None => AppConfig::default(),
        };

        let overrides = [
            (LoanField::Principal, &self.principal),
            (LoanField::AnnualRate, &self.rate),
            (LoanField::Tenure, &self.tenure),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                config.form.set(field, value.as_str());
            }
        }

        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(policy) = self.zero_rate {
            config.zero_rate = policy;
        }
        if self.no_chart {
            config.chart = false;
        }
        if let Some(width) = self.chart_width {
            config.chart_width = width;
        }

        config.validate()?;
        Ok(config)
    }
}
