use crate::adapters::display::format_amount;
use crate::core::{ChartRenderer, PieSeries};
use crate::utils::error::{EmiError, Result};
use serde::Serialize;
use std::io::Write;

pub const DEFAULT_CHART_WIDTH: usize = 40;

const SLICE_GLYPHS: [char; 2] = ['#', '='];

/// What a renderer remembers about the chart it drew.
#[derive(Debug, Clone, PartialEq)]
pub struct PieHandle {
    pub series: PieSeries,
    pub draws: u32,
}

impl PieHandle {
    fn new(series: &PieSeries) -> Self {
        Self {
            series: series.clone(),
            draws: 1,
        }
    }

    fn replace(&mut self, series: &PieSeries) {
        self.series.slices[0].value = series.slices[0].value;
        self.series.slices[1].value = series.slices[1].value;
        self.draws += 1;
    }
}

/// Fraction of the pie each slice takes, or `None` when the values cannot be
/// drawn (non-finite, or nothing positive to share out).
pub fn slice_shares(series: &PieSeries) -> Option<[f64; 2]> {
    let values = series.values();
    if values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let clamped = values.map(|v| v.max(0.0));
    let total: f64 = clamped.iter().sum();
    if total <= 0.0 {
        return None;
    }

    Some(clamped.map(|v| v / total))
}

/// Terminal pie chart: a proportional bar and a legend with percentages.
#[derive(Debug)]
pub struct AsciiPieChart<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> AsciiPieChart<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self { out, width }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn draw(&mut self, series: &PieSeries) -> Result<()> {
        if self.width == 0 {
            return Err(EmiError::render("chart width must be at least 1"));
        }

        let Some(shares) = slice_shares(series) else {
            writeln!(self.out, "[chart unavailable: values cannot be plotted]")?;
            self.out.flush()?;
            return Ok(());
        };

        let first = ((shares[0] * self.width as f64).round() as usize).min(self.width);
        let mut bar = String::with_capacity(self.width);
        bar.extend(std::iter::repeat(SLICE_GLYPHS[0]).take(first));
        bar.extend(std::iter::repeat(SLICE_GLYPHS[1]).take(self.width - first));
        writeln!(self.out, "[{}]", bar)?;

        for ((slice, glyph), share) in series.slices.iter().zip(SLICE_GLYPHS).zip(shares) {
            writeln!(
                self.out,
                " {} {:<22} {:>12} {:>6.1}%",
                glyph,
                slice.label,
                format_amount(slice.value),
                share * 100.0
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> ChartRenderer for AsciiPieChart<W> {
    type Handle = PieHandle;

    fn create(&mut self, series: &PieSeries) -> Result<PieHandle> {
        self.draw(series)?;
        Ok(PieHandle::new(series))
    }

    fn update(&mut self, handle: &mut PieHandle, series: &PieSeries) -> Result<()> {
        handle.replace(series);
        self.draw(&handle.series)
    }
}

#[derive(Serialize)]
struct ChartLine<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    action: &'static str,
    draws: u32,
    series: &'a PieSeries,
}

/// Writes each create/update as a JSON line, next to `JsonReport` output.
#[derive(Debug)]
pub struct JsonChart<W: Write> {
    out: W,
}

impl<W: Write> JsonChart<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn emit(&mut self, action: &'static str, handle: &PieHandle) -> Result<()> {
        let line = ChartLine {
            kind: "chart",
            action,
            draws: handle.draws,
            series: &handle.series,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> ChartRenderer for JsonChart<W> {
    type Handle = PieHandle;

    fn create(&mut self, series: &PieSeries) -> Result<PieHandle> {
        let handle = PieHandle::new(series);
        self.emit("create", &handle)?;
        Ok(handle)
    }

    fn update(&mut self, handle: &mut PieHandle, series: &PieSeries) -> Result<()> {
        handle.replace(series);
        self.emit("update", handle)
    }
}

/// Keeps the chart lifecycle without drawing anything (`--no-chart`).
#[derive(Debug, Default)]
pub struct NoChart;

impl ChartRenderer for NoChart {
    type Handle = PieHandle;

    fn create(&mut self, series: &PieSeries) -> Result<PieHandle> {
        Ok(PieHandle::new(series))
    }

    fn update(&mut self, handle: &mut PieHandle, series: &PieSeries) -> Result<()> {
        handle.replace(series);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(chart: &AsciiPieChart<Vec<u8>>) -> String {
        String::from_utf8(chart.get_ref().clone()).unwrap()
    }

    #[test]
    fn test_slice_shares() {
        let shares = slice_shares(&PieSeries::new(250.0, 750.0)).unwrap();
        assert_eq!(shares, [0.25, 0.75]);

        assert!(slice_shares(&PieSeries::new(f64::NAN, 10000.0)).is_none());
        assert!(slice_shares(&PieSeries::new(0.0, 0.0)).is_none());
        assert_eq!(slice_shares(&PieSeries::new(-5.0, 100.0)), Some([0.0, 1.0]));
    }

    #[test]
    fn test_ascii_chart_draws_bar_and_legend() {
        let mut chart = AsciiPieChart::new(Vec::new(), 20);
        let handle = chart.create(&PieSeries::new(250.0, 750.0)).unwrap();
        assert_eq!(handle.draws, 1);

        let text = output(&chart);
        assert!(text.starts_with("[#####===============]\n"), "{}", text);
        assert!(text.contains("Total Interest"));
        assert!(text.contains("25.0%"));
        assert!(text.contains("Principal Loan Amount"));
        assert!(text.contains("75.0%"));
    }

    #[test]
    fn test_ascii_chart_update_redraws() {
        let mut chart = AsciiPieChart::new(Vec::new(), 10);
        let mut handle = chart.create(&PieSeries::new(411.0, 10000.0)).unwrap();
        chart.update(&mut handle, &PieSeries::new(4109.0, 100000.0)).unwrap();

        assert_eq!(handle.draws, 2);
        assert_eq!(handle.series.values(), [4109.0, 100000.0]);
        assert_eq!(output(&chart).matches('[').count(), 2);
    }

    #[test]
    fn test_ascii_chart_non_finite() {
        let mut chart = AsciiPieChart::new(Vec::new(), 10);
        chart.create(&PieSeries::new(f64::NAN, 10000.0)).unwrap();
        assert!(output(&chart).contains("chart unavailable"));
    }

    #[test]
    fn test_zero_width_is_an_error() {
        let mut chart = AsciiPieChart::new(Vec::new(), 0);
        let err = chart.create(&PieSeries::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, EmiError::RenderError { .. }));
    }

    #[test]
    fn test_json_chart_lines() {
        let mut chart = JsonChart::new(Vec::new());
        let mut handle = chart.create(&PieSeries::new(411.0, 10000.0)).unwrap();
        chart.update(&mut handle, &PieSeries::new(0.0, 5000.0)).unwrap();

        let text = String::from_utf8(chart.out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["action"], "create");
        assert_eq!(lines[1]["action"], "update");
        assert_eq!(lines[1]["draws"], 2);
        assert_eq!(lines[1]["series"]["slices"][1]["value"], 5000.0);
    }
}
