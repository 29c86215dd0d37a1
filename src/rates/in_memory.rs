//! In-memory rate source
//!
//! Preloaded rates for tests and offline use. Tracks how many lookups
//! actually reached it, which is what cache tests assert on.

use crate::currency::Currency;
use crate::error::{CambioError, Result};
use crate::rates::source::{validate_range, RateSource};
use crate::types::{ConversionRequest, ConversionResult, RateSeries, RateSeriesPoint};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Rate source backed by in-memory tables
///
/// # Example
/// ```
/// use cambio::rates::{InMemoryRateSource, RateSource};
/// use cambio::currency::Currency;
///
/// let mut source = InMemoryRateSource::new();
/// source.add_rate(Currency::EUR, Currency::USD, 1.25).unwrap();
///
/// let result = source.fetch_latest(100.0, Currency::EUR, Currency::USD).unwrap();
/// assert_eq!(result.converted, 125.0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRateSource {
    rates: RwLock<HashMap<(Currency, Currency), f64>>,
    series: RwLock<HashMap<(Currency, Currency), Vec<RateSeriesPoint>>>,
    calls: AtomicUsize,
}

impl InMemoryRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a latest rate: one unit of `source` buys `rate` units of
    /// `target`. The inverse direction is derived automatically on lookup.
    pub fn add_rate(&mut self, source: Currency, target: Currency, rate: f64) -> Result<()> {
        if rate <= 0.0 {
            return Err(CambioError::Validation(format!(
                "Rate must be positive, got {}",
                rate
            )));
        }

        let mut rates = self.rates.write().unwrap();
        rates.insert((source, target), rate);
        Ok(())
    }

    /// Register one dated observation for the pair's historical series.
    pub fn add_series_point(
        &mut self,
        source: Currency,
        target: Currency,
        date: NaiveDate,
        rate: f64,
    ) -> Result<()> {
        if rate <= 0.0 {
            return Err(CambioError::Validation(format!(
                "Rate must be positive, got {}",
                rate
            )));
        }

        let mut series = self.series.write().unwrap();
        series
            .entry((source, target))
            .or_default()
            .push(RateSeriesPoint { date, rate });
        Ok(())
    }

    /// Number of lookups that reached this source (identity conversions are
    /// answered before the count).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup_rate(&self, source: Currency, target: Currency) -> Option<f64> {
        let rates = self.rates.read().unwrap();
        if let Some(&rate) = rates.get(&(source, target)) {
            return Some(rate);
        }
        rates.get(&(target, source)).map(|&rate| 1.0 / rate)
    }
}

impl RateSource for InMemoryRateSource {
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

        self.calls.fetch_add(1, Ordering::SeqCst);

        let rate = self.lookup_rate(source, target).ok_or_else(|| {
            CambioError::Format(format!("No rate loaded for {}/{}", source, target))
        })?;

        Ok(ConversionResult::new(request, amount * rate))
    }

    fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        source: Currency,
        target: Currency,
    ) -> Result<RateSeries> {
        validate_range(start, end)?;

        self.calls.fetch_add(1, Ordering::SeqCst);

        let series = self.series.read().unwrap();
        let points = series
            .get(&(source, target))
            .map(|points| {
                points
                    .iter()
                    .copied()
                    .filter(|p| p.date >= start && p.date <= end)
                    .collect()
            })
            .unwrap_or_default();

        Ok(RateSeries::from_points(points))
    }
}
