use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two input shapes a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// One or more ASCII digits.
    WholeNumber,
    /// Optional digits and a dot, then one or more digits.
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanField {
    Principal,
    AnnualRate,
    Tenure,
}

impl LoanField {
    pub const ALL: [LoanField; 3] = [LoanField::Principal, LoanField::AnnualRate, LoanField::Tenure];

    pub fn pattern_kind(self) -> PatternKind {
        match self {
            LoanField::Principal | LoanField::Tenure => PatternKind::WholeNumber,
            LoanField::AnnualRate => PatternKind::Decimal,
        }
    }

    /// Key used in config files and interactive commands.
    pub fn key(self) -> &'static str {
        match self {
            LoanField::Principal => "principal",
            LoanField::AnnualRate => "rate",
            LoanField::Tenure => "tenure",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoanField::Principal => "Loan Amount",
            LoanField::AnnualRate => "Interest Rate (%)",
            LoanField::Tenure => "Loan Tenure (months)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Default text substituted into a field that fails its pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackTable {
    pub principal: String,
    pub rate: String,
    pub tenure: String,
}

impl FallbackTable {
    pub fn get(&self, field: LoanField) -> &str {
        match field {
            LoanField::Principal => &self.principal,
            LoanField::AnnualRate => &self.rate,
            LoanField::Tenure => &self.tenure,
        }
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self {
            principal: "10000".to_string(),
            rate: "7.5".to_string(),
            tenure: "12".to_string(),
        }
    }
}

/// The three raw input fields. Values are kept exactly as entered until
/// validation overwrites an invalid one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanForm {
    principal: String,
    rate: String,
    tenure: String,
}

impl LoanForm {
    pub fn new(
        principal: impl Into<String>,
        rate: impl Into<String>,
        tenure: impl Into<String>,
    ) -> Self {
        Self {
            principal: principal.into(),
            rate: rate.into(),
            tenure: tenure.into(),
        }
    }

    pub fn get(&self, field: LoanField) -> &str {
        match field {
            LoanField::Principal => &self.principal,
            LoanField::AnnualRate => &self.rate,
            LoanField::Tenure => &self.tenure,
        }
    }

    pub fn set(&mut self, field: LoanField, value: impl Into<String>) {
        let slot = match field {
            LoanField::Principal => &mut self.principal,
            LoanField::AnnualRate => &mut self.rate,
            LoanField::Tenure => &mut self.tenure,
        };
        *slot = value.into();
    }
}

impl From<&FallbackTable> for LoanForm {
    fn from(defaults: &FallbackTable) -> Self {
        Self::new(&defaults.principal, &defaults.rate, &defaults.tenure)
    }
}

/// Numeric loan parameters read from a validated form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: f64,
}

impl LoanTerms {
    /// Per-month fractional rate.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmiBreakdown {
    /// Unrounded installment; this is what feeds `total_amount`.
    pub emi: f64,
    pub emi_rounded: f64,
    pub total_amount: f64,
    pub total_interest: f64,
}

impl EmiBreakdown {
    pub fn is_finite(&self) -> bool {
        self.emi.is_finite() && self.total_amount.is_finite() && self.total_interest.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    pub color: &'static str,
    pub value: f64,
}

/// Two-slice series: total interest first, principal second.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSeries {
    pub slices: [PieSlice; 2],
}

impl PieSeries {
    pub const INTEREST_LABEL: &'static str = "Total Interest";
    pub const PRINCIPAL_LABEL: &'static str = "Principal Loan Amount";

    pub fn new(total_interest: f64, principal: f64) -> Self {
        Self {
            slices: [
                PieSlice {
                    label: Self::INTEREST_LABEL,
                    color: "#e63946",
                    value: total_interest,
                },
                PieSlice {
                    label: Self::PRINCIPAL_LABEL,
                    color: "#14213d",
                    value: principal,
                },
            ],
        }
    }

    pub fn values(&self) -> [f64; 2] {
        [self.slices[0].value, self.slices[1].value]
    }
}

/// Either no chart has been drawn yet, or one exists behind handle `H`.
#[derive(Debug, Default)]
pub enum ChartState<H> {
    #[default]
    Uninitialized,
    Initialized(H),
}

impl<H> ChartState<H> {
    pub fn is_initialized(&self) -> bool {
        matches!(self, ChartState::Initialized(_))
    }

    pub fn handle(&self) -> Option<&H> {
        match self {
            ChartState::Initialized(handle) => Some(handle),
            ChartState::Uninitialized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        let terms = LoanTerms {
            principal: 100000.0,
            annual_rate_percent: 7.5,
            tenure_months: 12.0,
        };
        assert_eq!(terms.monthly_rate(), 0.00625);
    }

    #[test]
    fn test_form_starts_from_fallbacks() {
        let form = LoanForm::from(&FallbackTable::default());
        assert_eq!(form.get(LoanField::Principal), "10000");
        assert_eq!(form.get(LoanField::AnnualRate), "7.5");
        assert_eq!(form.get(LoanField::Tenure), "12");
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in LoanField::ALL {
            assert_eq!(LoanField::from_key(field.key()), Some(field));
        }
        assert_eq!(LoanField::from_key("amount"), None);
    }

    #[test]
    fn test_pie_series_order() {
        let series = PieSeries::new(411.0, 10000.0);
        assert_eq!(series.values(), [411.0, 10000.0]);
        assert_eq!(series.slices[0].label, "Total Interest");
        assert_eq!(series.slices[1].color, "#14213d");
    }
}
