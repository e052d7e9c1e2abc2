use crate::domain::model::{EmiBreakdown, LoanTerms};
use serde::{Deserialize, Serialize};

/// How the installment is computed when the monthly rate is exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ZeroRatePolicy {
    /// Interest-free loan: `EMI = P / n`. Positive rates use a form of the
    /// formula that stays finite as the rate approaches zero.
    #[default]
    Linear,
    /// Evaluate the amortization formula as written, which yields `NaN`.
    Compat,
}

impl ZeroRatePolicy {
    pub const NAMES: [&'static str; 2] = ["linear", "compat"];
}

/// Rounds to the nearest integer, ties toward positive infinity
/// (`2.5 -> 3`, `-2.5 -> -2`). Non-finite values are returned as is.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Monthly installment for the given terms, unrounded.
pub fn monthly_installment(terms: &LoanTerms, policy: ZeroRatePolicy) -> f64 {
    let p = terms.principal;
    let n = terms.tenure_months;
    let r = terms.monthly_rate();

    match policy {
        ZeroRatePolicy::Linear => {
            if r == 0.0 {
                return p / n;
            }
            // (1+r)^n - 1 without forming 1+r, which rounds to 1 for tiny r.
            let accrued = (n * r.ln_1p()).exp_m1();
            p * r * ((accrued + 1.0) / accrued)
        }
        ZeroRatePolicy::Compat => {
            let growth = (1.0 + r).powf(n);
            p * r * (growth / (growth - 1.0))
        }
    }
}

/// EMI plus the rounded totals. `total_amount` is built from the unrounded
/// installment; `total_interest` from the rounded `total_amount`.
pub fn compute(terms: &LoanTerms, policy: ZeroRatePolicy) -> EmiBreakdown {
    let emi = monthly_installment(terms, policy);
    let total_amount = round_half_up(terms.tenure_months * emi);
    let total_interest = round_half_up(total_amount - terms.principal);

    EmiBreakdown {
        emi,
        emi_rounded: round_half_up(emi),
        total_amount,
        total_interest,
    }
}
