//! Exploding rate source - testing stub
//!
//! Panics on any rate lookup. Used in tests to prove that a code path never
//! consults the provider: identity conversions and rejected inputs must be
//! answered before the source is reached.

use crate::currency::Currency;
use crate::error::Result;
use crate::rates::source::RateSource;
use crate::types::{ConversionRequest, ConversionResult, RateSeries};
use chrono::NaiveDate;

/// Rate source that panics on any lookup
///
/// Identity conversions are allowed, mirroring the provider client's own
/// short-circuit.
///
/// # Example
/// ```should_panic
/// use cambio::rates::{ExplodingRateSource, RateSource};
/// use cambio::currency::Currency;
///
/// let source = ExplodingRateSource::new();
///
/// // This will panic!
/// source.fetch_latest(1.0, Currency::EUR, Currency::USD).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplodingRateSource {
    message: Option<&'static str>,
}

impl ExplodingRateSource {
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Create with a custom panic message
    pub fn with_message(message: &'static str) -> Self {
        Self {
            message: Some(message),
        }
    }

    fn panic_message(&self) -> &'static str {
        self.message
            .unwrap_or("Rate lookup not allowed! This path must not consult the provider.")
    }
}

impl RateSource for ExplodingRateSource {
    fn fetch_latest(
        &self,
        amount: f64,
        source: Currency,
        target: Currency,
    ) -> Result<ConversionResult> {
        let request = ConversionRequest::new(amount, source, target);
        request.validate()?;

        if source == target {
            return Ok(ConversionResult::new(request, amount));
        }

        panic!(
            "{}\n\nAttempted conversion: {} -> {}",
            self.panic_message(),
            source,
            target
        );
    }

    fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        source: Currency,
        target: Currency,
    ) -> Result<RateSeries> {
        panic!(
            "{}\n\nAttempted series fetch: {} -> {} over {}..{}",
            self.panic_message(),
            source,
            target,
            start,
            end
        );
    }
}
