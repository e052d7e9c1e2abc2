use crate::core::calculator::{self, ZeroRatePolicy};
use crate::core::validator::{InputValidator, ValidationReport};
use crate::core::{
    ChartRenderer, ChartState, DisplaySink, EmiBreakdown, LoanField, LoanForm, LoanTerms,
    PieSeries,
};
use crate::utils::error::Result;

/// What a single trigger produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub report: ValidationReport,
    pub terms: LoanTerms,
    pub breakdown: EmiBreakdown,
    /// True when this run created the chart rather than updating it.
    pub chart_created: bool,
}

/// Owns the form and the presentation sinks, and runs
/// validate -> refresh -> compute -> render on every trigger.
pub struct EmiEngine<D: DisplaySink, C: ChartRenderer> {
    form: LoanForm,
    validator: InputValidator,
    policy: ZeroRatePolicy,
    display: D,
    chart: C,
    chart_state: ChartState<C::Handle>,
}

impl<D: DisplaySink, C: ChartRenderer> EmiEngine<D, C> {
    pub fn new(
        form: LoanForm,
        validator: InputValidator,
        policy: ZeroRatePolicy,
        display: D,
        chart: C,
    ) -> Self {
        Self {
            form,
            validator,
            policy,
            display,
            chart,
            chart_state: ChartState::Uninitialized,
        }
    }

    pub fn form(&self) -> &LoanForm {
        &self.form
    }

    /// Overwrites a raw field. The text is only checked on the next `run`.
    pub fn set_field(&mut self, field: LoanField, text: impl Into<String>) {
        self.form.set(field, text);
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn chart_state(&self) -> &ChartState<C::Handle> {
        &self.chart_state
    }

    pub fn run(&mut self) -> Result<RunOutcome> {
        // Repair invalid fields in place before reading any numbers
        tracing::debug!("Validating inputs: {:?}", self.form);
        let report = self.validator.validate(&mut self.form);

        // Re-read the now-valid text as numbers
        let terms = read_terms(&self.form);
        tracing::debug!(
            "Loan terms: principal={}, annual_rate={}%, tenure={} months, monthly_rate={}",
            terms.principal,
            terms.annual_rate_percent,
            terms.tenure_months,
            terms.monthly_rate()
        );

        // Non-finite results are shown as they are, never raised
        let breakdown = calculator::compute(&terms, self.policy);
        if !breakdown.is_finite() {
            tracing::warn!(
                "Calculation produced a non-finite result (emi={}, total={})",
                breakdown.emi,
                breakdown.total_amount
            );
        }

        // Text regions first, then the chart
        self.display.show(&breakdown)?;

        let series = PieSeries::new(breakdown.total_interest, terms.principal);
        let chart_created = self.render_chart(&series)?;

        Ok(RunOutcome {
            report,
            terms,
            breakdown,
            chart_created,
        })
    }

    fn render_chart(&mut self, series: &PieSeries) -> Result<bool> {
        match &mut self.chart_state {
            ChartState::Initialized(handle) => {
                tracing::debug!("Updating chart with {:?}", series.values());
                self.chart.update(handle, series)?;
                Ok(false)
            }
            // First run: the only transition into Initialized
            ChartState::Uninitialized => {
                tracing::debug!("Creating chart with {:?}", series.values());
                let handle = self.chart.create(series)?;
                self.chart_state = ChartState::Initialized(handle);
                Ok(true)
            }
        }
    }
}

/// Validated fields always parse; anything else reads as `NaN`.
fn read_terms(form: &LoanForm) -> LoanTerms {
    let parse = |field| form.get(field).parse::<f64>().unwrap_or(f64::NAN);
    LoanTerms {
        principal: parse(LoanField::Principal),
        annual_rate_percent: parse(LoanField::AnnualRate),
        tenure_months: parse(LoanField::Tenure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FallbackTable;

    #[derive(Default)]
    struct Recorded {
        shown: Vec<EmiBreakdown>,
    }

    impl DisplaySink for Recorded {
        fn show(&mut self, breakdown: &EmiBreakdown) -> Result<()> {
            self.shown.push(*breakdown);
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingChart {
        creates: usize,
        updates: usize,
    }

    impl ChartRenderer for CountingChart {
        type Handle = [f64; 2];

        fn create(&mut self, series: &PieSeries) -> Result<Self::Handle> {
            self.creates += 1;
            Ok(series.values())
        }

        fn update(&mut self, handle: &mut Self::Handle, series: &PieSeries) -> Result<()> {
            self.updates += 1;
            *handle = series.values();
            Ok(())
        }
    }

    fn engine(form: LoanForm) -> EmiEngine<Recorded, CountingChart> {
        EmiEngine::new(
            form,
            InputValidator::new(FallbackTable::default()).unwrap(),
            ZeroRatePolicy::Linear,
            Recorded::default(),
            CountingChart::default(),
        )
    }

    #[test]
    fn test_first_run_creates_chart() {
        let mut engine = engine(LoanForm::new("10000", "7.5", "12"));
        assert!(!engine.chart_state().is_initialized());

        let outcome = engine.run().unwrap();

        assert!(outcome.chart_created);
        assert_eq!(outcome.breakdown.emi_rounded, 868.0);
        assert_eq!(engine.chart().creates, 1);
        assert_eq!(engine.chart_state().handle(), Some(&[411.0, 10000.0]));
    }

    #[test]
    fn test_later_runs_update_chart() {
        let mut engine = engine(LoanForm::new("10000", "7.5", "12"));
        engine.run().unwrap();
        engine.set_field(LoanField::Principal, "100000");
        let outcome = engine.run().unwrap();

        assert!(!outcome.chart_created);
        assert_eq!(engine.chart().creates, 1);
        assert_eq!(engine.chart().updates, 1);
        assert_eq!(engine.chart_state().handle(), Some(&[4109.0, 100000.0]));
    }

    #[test]
    fn test_invalid_fields_are_repaired_before_computing() {
        let mut engine = engine(LoanForm::new("ten", "-3", ""));
        let outcome = engine.run().unwrap();

        assert_eq!(engine.form(), &LoanForm::new("10000", "7.5", "12"));
        assert_eq!(outcome.report.substitutions.len(), 3);
        assert_eq!(outcome.breakdown.total_amount, 10411.0);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut engine = engine(LoanForm::new("123456", "9.99", "48"));
        let first = engine.run().unwrap();
        let second = engine.run().unwrap();

        assert_eq!(first.breakdown.emi.to_bits(), second.breakdown.emi.to_bits());
        assert_eq!(first.breakdown, second.breakdown);
        assert_eq!(engine.display().shown.len(), 2);
    }

    #[test]
    fn test_read_terms_parses_validated_text() {
        let terms = read_terms(&LoanForm::new("007", ".5", "12"));
        assert_eq!(terms.principal, 7.0);
        assert_eq!(terms.annual_rate_percent, 0.5);
        assert_eq!(terms.tenure_months, 12.0);
    }
}
