//! Core value types - conversion requests, results and rate series

use crate::currency::Currency;
use crate::error::{CambioError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single conversion request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Amount in the source currency
    pub amount: f64,
    pub source: Currency,
    pub target: Currency,
}

impl ConversionRequest {
    pub fn new(amount: f64, source: Currency, target: Currency) -> Self {
        Self {
            amount,
            source,
            target,
        }
    }

    /// Check the request invariants: the amount must be a finite,
    /// non-negative number.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CambioError::Validation(format!(
                "Amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// A completed conversion, immutable once created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub request: ConversionRequest,
    /// Amount in the target currency
    pub converted: f64,
    /// Instant the conversion was computed
    pub timestamp: DateTime<Utc>,
}

impl ConversionResult {
    pub fn new(request: ConversionRequest, converted: f64) -> Self {
        Self {
            request,
            converted,
            timestamp: Utc::now(),
        }
    }
}

/// One dated observation in a historical rate series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSeriesPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Historical rates for a currency pair over a date range
///
/// Points are strictly ascending by date with no duplicates; the constructor
/// enforces both. An empty series is the normal "no data for this period"
/// result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    points: Vec<RateSeriesPoint>,
}

impl RateSeries {
    /// The empty series
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from points in any order. Sorts ascending by date and
    /// keeps the first point seen for a duplicate date.
    pub fn from_points(mut points: Vec<RateSeriesPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self { points }
    }

    pub fn points(&self) -> &[RateSeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&RateSeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&RateSeriesPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RateSeriesPoint> {
        self.points.iter()
    }
}
