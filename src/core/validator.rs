use crate::domain::model::{FallbackTable, LoanField, LoanForm, PatternKind};
use crate::utils::error::Result;
use crate::utils::validation::validate_pattern;
use regex::Regex;

const WHOLE_NUMBER: &str = r"^[0-9]+$";
// ASCII classes: `\d` in `regex` also matches non-ASCII digits.
const DECIMAL_NUMBER: &str = r"^([0-9]*\.)?[0-9]+$";

/// A field that failed its pattern and was overwritten with its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub field: LoanField,
    pub rejected: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub substitutions: Vec<Substitution>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.substitutions.is_empty()
    }

    pub fn replaced(&self, field: LoanField) -> bool {
        self.substitutions.iter().any(|s| s.field == field)
    }
}

/// Repairs a `LoanForm` in place: any field that does not match its pattern
/// is replaced by the matching entry of the fallback table. Never fails.
#[derive(Debug, Clone)]
pub struct InputValidator {
    whole_number: Regex,
    decimal: Regex,
    fallbacks: FallbackTable,
}

impl InputValidator {
    /// Fails if a fallback entry does not satisfy its own field's pattern.
    pub fn new(fallbacks: FallbackTable) -> Result<Self> {
        let validator = Self {
            whole_number: Regex::new(WHOLE_NUMBER)?,
            decimal: Regex::new(DECIMAL_NUMBER)?,
            fallbacks,
        };

        for field in LoanField::ALL {
            validate_pattern(
                &format!("defaults.{}", field.key()),
                validator.fallbacks.get(field),
                validator.pattern(field),
                describe(field.pattern_kind()),
            )?;
        }

        Ok(validator)
    }

    pub fn is_valid(&self, field: LoanField, text: &str) -> bool {
        self.pattern(field).is_match(text)
    }

    pub fn validate(&self, form: &mut LoanForm) -> ValidationReport {
        let mut report = ValidationReport::default();

        for field in LoanField::ALL {
            if self.is_valid(field, form.get(field)) {
                continue;
            }

            let replacement = self.fallbacks.get(field).to_string();
            tracing::warn!(
                "Invalid {} '{}', using default {}",
                field,
                form.get(field),
                replacement
            );
            report.substitutions.push(Substitution {
                field,
                rejected: form.get(field).to_string(),
                replacement: replacement.clone(),
            });
            form.set(field, replacement);
        }

        report
    }

    fn pattern(&self, field: LoanField) -> &Regex {
        match field.pattern_kind() {
            PatternKind::WholeNumber => &self.whole_number,
            PatternKind::Decimal => &self.decimal,
        }
    }
}

fn describe(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::WholeNumber => "a whole number (digits only)",
        PatternKind::Decimal => "a non-negative decimal number",
    }
}
