use crate::core::{DisplaySink, EmiBreakdown};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

/// Renders a rounded amount the way a browser prints a number:
/// `868`, `1e+25`, `NaN`, `Infinity`, `-Infinity`.
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 {
        // Exponent form from 1e21 up, always signed: 1.5e+25.
        format!("{:e}", value).replacen('e', "e+", 1)
    } else {
        format!("{}", value)
    }
}

/// Plain-text result block: installment, total interest, total amount.
#[derive(Debug)]
pub struct TextDisplay<W: Write> {
    out: W,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TextDisplay<W> {
    fn show(&mut self, breakdown: &EmiBreakdown) -> Result<()> {
        writeln!(self.out, "Loan EMI:       {}", format_amount(breakdown.emi_rounded))?;
        writeln!(self.out, "Total Interest: {}", format_amount(breakdown.total_interest))?;
        writeln!(self.out, "Total Amount:   {}", format_amount(breakdown.total_amount))?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ResultLine<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    breakdown: &'a EmiBreakdown,
}

/// One JSON object per run. Non-finite numbers are written as `null`.
#[derive(Debug)]
pub struct JsonReport<W: Write> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> DisplaySink for JsonReport<W> {
    fn show(&mut self, breakdown: &EmiBreakdown) -> Result<()> {
        let line = ResultLine {
            kind: "result",
            breakdown,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
