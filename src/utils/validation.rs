use crate::utils::error::{EmiError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(EmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// `description` names the expected shape in the error, e.g. "a whole number".
pub fn validate_pattern(
    field_name: &str,
    value: &str,
    pattern: &Regex,
    description: &str,
) -> Result<()> {
    if !pattern.is_match(value) {
        return Err(EmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be {}", description),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("display.chart_width", 40, 10, 200).is_ok());
        assert!(validate_range("display.chart_width", 10, 10, 200).is_ok());
        assert!(validate_range("display.chart_width", 5, 10, 200).is_err());
        assert!(validate_range("display.chart_width", 201, 10, 200).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("display.format", "json", &["text", "json"]).is_ok());
        assert!(validate_one_of("display.format", "csv", &["text", "json"]).is_err());
    }

    #[test]
    fn test_validate_pattern() {
        let digits = Regex::new(r"^[0-9]+$").unwrap();
        assert!(validate_pattern("defaults.tenure", "12", &digits, "a whole number").is_ok());

        let err = validate_pattern("defaults.tenure", "1.5", &digits, "a whole number")
            .unwrap_err();
        assert!(err.to_string().contains("a whole number"));
    }
}
