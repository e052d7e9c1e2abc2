use crate::core::FallbackTable;
use crate::utils::error::{EmiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file layout. Every table is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub inputs: Option<InputsConfig>,
    pub defaults: Option<FallbackTable>,
    pub calculation: Option<CalculationConfig>,
    pub display: Option<DisplayConfig>,
}

/// Initial raw field values, kept as text so they go through validation
/// like anything typed at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputsConfig {
    pub principal: Option<String>,
    pub rate: Option<String>,
    pub tenure: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationConfig {
    pub zero_rate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub format: Option<String>,
    pub chart: Option<bool>,
    pub chart_width: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EmiError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EmiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the variable's value; unknown variables
    /// are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn zero_rate(&self) -> Option<&str> {
        self.calculation.as_ref()?.zero_rate.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.display.as_ref()?.format.as_deref()
    }

    pub fn chart_enabled(&self) -> Option<bool> {
        self.display.as_ref()?.chart
    }

    pub fn chart_width(&self) -> Option<usize> {
        self.display.as_ref()?.chart_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[inputs]
principal = "250000"
rate = "8.25"
tenure = "60"

[defaults]
principal = "5000"
rate = "6"
tenure = "24"

[calculation]
zero_rate = "compat"

[display]
format = "json"
chart = false
chart_width = 30
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        let inputs = config.inputs.as_ref().unwrap();
        assert_eq!(inputs.principal.as_deref(), Some("250000"));
        assert_eq!(config.defaults.as_ref().unwrap().rate, "6");
        assert_eq!(config.zero_rate(), Some("compat"));
        assert_eq!(config.format(), Some("json"));
        assert_eq!(config.chart_enabled(), Some(false));
        assert_eq!(config.chart_width(), Some(30));
    }

    #[test]
    fn test_empty_file_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.inputs.is_none());
        assert!(config.defaults.is_none());
        assert_eq!(config.format(), None);
    }

    #[test]
    fn test_partial_defaults_table() {
        let config = TomlConfig::from_toml_str("[defaults]\ntenure = \"36\"\n").unwrap();
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.principal, "10000");
        assert_eq!(defaults.rate, "7.5");
        assert_eq!(defaults.tenure, "36");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("EMI_CALC_TEST_PRINCIPAL", "777000");

        let toml_content = r#"
[inputs]
principal = "${EMI_CALC_TEST_PRINCIPAL}"
rate = "${EMI_CALC_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let inputs = config.inputs.unwrap();
        assert_eq!(inputs.principal.as_deref(), Some("777000"));
        assert_eq!(inputs.rate.as_deref(), Some("${EMI_CALC_TEST_UNSET_VARIABLE}"));

        std::env::remove_var("EMI_CALC_TEST_PRINCIPAL");
    }

    #[test]
    fn test_malformed_toml() {
        let err = TomlConfig::from_toml_str("[display\nformat = ").unwrap_err();
        assert!(matches!(err, EmiError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\nchart_width = 64\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.chart_width(), Some(64));
    }

    #[test]
    fn test_missing_file() {
        let err = TomlConfig::from_file("/nonexistent/emi-calc.toml").unwrap_err();
        assert!(matches!(err, EmiError::IoError(_)));
    }
}
