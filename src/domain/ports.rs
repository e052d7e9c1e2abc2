use crate::domain::model::{EmiBreakdown, PieSeries};
use crate::utils::error::Result;

/// Text regions that show the installment, total interest and total amount.
pub trait DisplaySink {
    fn show(&mut self, breakdown: &EmiBreakdown) -> Result<()>;
}

/// Pie-chart widget. `create` is called once; every later run goes through
/// `update` on the handle it returned.
pub trait ChartRenderer {
    type Handle;

    fn create(&mut self, series: &PieSeries) -> Result<Self::Handle>;
    fn update(&mut self, handle: &mut Self::Handle, series: &PieSeries) -> Result<()>;
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn show(&mut self, breakdown: &EmiBreakdown) -> Result<()> {
        (**self).show(breakdown)
    }
}

impl<T: ChartRenderer + ?Sized> ChartRenderer for Box<T> {
    type Handle = T::Handle;

    fn create(&mut self, series: &PieSeries) -> Result<Self::Handle> {
        (**self).create(series)
    }

    fn update(&mut self, handle: &mut Self::Handle, series: &PieSeries) -> Result<()> {
        (**self).update(handle, series)
    }
}
