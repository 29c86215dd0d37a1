//! Base rate system - the RateSource trait and shared validation

use crate::currency::Currency;
use crate::error::{CambioError, Result};
use crate::types::{ConversionResult, RateSeries};
use chrono::NaiveDate;

/// Trait for obtaining exchange rates
///
/// Implementations convert a source amount at the latest known rate and
/// produce historical series over a date range. The HTTP provider client is
/// the production implementation; in-memory and exploding sources back tests
/// and offline use.
pub trait RateSource: Send + Sync {
    /// Convert `amount` from `source` to `target` at the latest rate.
    ///
    /// When `source == target` the amount comes back unchanged and no
    /// lookup of any kind is performed.
    fn fetch_latest(
        &self,
        amount: f64,
        source: Currency,
        target: Currency,
    ) -> Result<ConversionResult>;

    /// Historical rates for the pair over the inclusive `[start, end]` range.
    ///
    /// Requires `start <= end`. A period with no observations yields an
    /// empty series, not an error.
    fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        source: Currency,
        target: Currency,
    ) -> Result<RateSeries>;
}

impl<T: RateSource + ?Sized> RateSource for std::sync::Arc<T> {
    fn fetch_latest(
        &self,
        amount: f64,
        source: Currency,
        target: Currency,
    ) -> Result<ConversionResult> {
        (**self).fetch_latest(amount, source, target)
    }

    fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        source: Currency,
        target: Currency,
    ) -> Result<RateSeries> {
        (**self).fetch_series(start, end, source, target)
    }
}

/// Check a series date range. Must run before any I/O is attempted.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(CambioError::Validation(format!(
            "Invalid date range: {} is after {}",
            start, end
        )));
    }
    Ok(())
}
