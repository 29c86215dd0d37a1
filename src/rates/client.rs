//! HTTP rate provider client
//!
//! Blocking client for a Frankfurter-style exchange rate API. One GET per
//! query, a hard timeout on every request, no retries: a slow or unreachable
//! provider surfaces as a transport error instead of hanging the caller.

use crate::currency::Currency;
use crate::error::{CambioError, Result};
use crate::rates::source::{validate_range, RateSource};
use crate::types::{ConversionRequest, ConversionResult, RateSeries, RateSeriesPoint};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default provider endpoint (European Central Bank reference rates)
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Timeout applied to every provider request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Blocking HTTP client for the rate provider
pub struct RateClient {
    http: Client,
    base_url: String,
}

impl RateClient {
    /// Client against the default provider with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Client against an arbitrary endpoint
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            CambioError::Transport(format!("Failed to build HTTP client: {}", e))
        })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn get_body(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);

        let response = self.http.get(url).send().map_err(|e| {
            if e.is_timeout() {
                CambioError::Transport(format!("Request timed out: {}", url))
            } else {
                CambioError::Transport(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CambioError::Transport(format!(
                "Provider returned {} for {}",
                status, url
            )));
        }

        response
            .text()
            .map_err(|e| CambioError::Transport(format!("Failed to read response body: {}", e)))
    }
}

/// Extract the converted value for `target` from a "latest" response body.
fn parse_latest(body: &str, target: Currency) -> Result<f64> {
    let parsed: LatestResponse = serde_json::from_str(body)
        .map_err(|e| CambioError::Format(format!("Unexpected latest-rates payload: {}", e)))?;

    parsed.rates.get(target.code()).copied().ok_or_else(|| {
        CambioError::Format(format!("Provider response has no rate for {}", target))
    })
}

/// Parse a date-keyed series response into an ascending series. An empty
/// rate mapping parses to an empty series.
fn parse_series(body: &str, target: Currency) -> Result<RateSeries> {
    let parsed: SeriesResponse = serde_json::from_str(body)
        .map_err(|e| CambioError::Format(format!("Unexpected series payload: {}", e)))?;

    let mut points = Vec::with_capacity(parsed.rates.len());
    for (date_key, day_rates) in &parsed.rates {
        let date = NaiveDate::parse_from_str(date_key, "%Y-%m-%d").map_err(|e| {
            CambioError::Format(format!("Bad date key {:?} in series: {}", date_key, e))
        })?;

        let rate = day_rates.get(target.code()).copied().ok_or_else(|| {
            CambioError::Format(format!("No {} rate on {}", target, date_key))
        })?;

        points.push(RateSeriesPoint { date, rate });
    }

    Ok(RateSeries::from_points(points))
}

impl RateSource for RateClient {
    fn fetch_latest(
        &self,
        amount: f64,
        source: Currency,
        target: Currency,
    ) -> Result<ConversionResult> {
        let request = ConversionRequest::new(amount, source, target);
        request.validate()?;

        // Identity conversion never touches the network.
        if source == target {
            return Ok(ConversionResult::new(request, amount));
        }

        let url = format!(
            "{}/latest?amount={}&from={}&to={}",
            self.base_url, amount, source, target
        );
        let body = self.get_body(&url)?;
        let converted = parse_latest(&body, target)?;

        Ok(ConversionResult::new(request, converted))
    }

    fn fetch_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        source: Currency,
        target: Currency,
    ) -> Result<RateSeries> {
        validate_range(start, end)?;

        let url = format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url, start, end, source, target
        );
        let body = self.get_body(&url)?;
        parse_series(&body, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_latest() {
        let body = r#"{"amount": 5.0, "base": "EUR", "rates": {"BRL": 27.35}}"#;
        let converted = parse_latest(body, Currency::BRL).unwrap();
        assert_relative_eq!(converted, 27.35);
    }

    #[test]
    fn test_parse_latest_missing_target_is_format_error() {
        let body = r#"{"rates": {"USD": 1.08}}"#;
        let err = parse_latest(body, Currency::BRL).unwrap_err();
        assert!(matches!(err, CambioError::Format(_)));
    }

    #[test]
    fn test_parse_latest_garbage_is_format_error() {
        let err = parse_latest("not json", Currency::BRL).unwrap_err();
        assert!(matches!(err, CambioError::Format(_)));
    }

    #[test]
    fn test_parse_series_sorted_ascending() {
        let body = r#"{"rates": {
            "2024-01-03": {"BRL": 5.44},
            "2024-01-01": {"BRL": 5.41},
            "2024-01-02": {"BRL": 5.43}
        }}"#;

        let series = parse_series(body, Currency::BRL).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            series.last().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        assert_relative_eq!(series.last().unwrap().rate, 5.44);
    }

    #[test]
    fn test_parse_series_empty_mapping_is_empty_series() {
        let body = r#"{"rates": {}}"#;
        let series = parse_series(body, Currency::BRL).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_parse_series_missing_target_is_format_error() {
        let body = r#"{"rates": {"2024-01-01": {"USD": 1.08}}}"#;
        let err = parse_series(body, Currency::BRL).unwrap_err();
        assert!(matches!(err, CambioError::Format(_)));
    }

    #[test]
    fn test_same_currency_short_circuits() {
        let client = RateClient::with_config("http://invalid.localhost", DEFAULT_TIMEOUT).unwrap();
        let result = client.fetch_latest(7.5, Currency::USD, Currency::USD).unwrap();
        assert_relative_eq!(result.converted, 7.5);
    }

    #[test]
    fn test_inverted_range_rejected_before_any_request() {
        let client = RateClient::with_config("http://invalid.localhost", DEFAULT_TIMEOUT).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let err = client
            .fetch_series(start, end, Currency::EUR, Currency::BRL)
            .unwrap_err();
        assert!(matches!(err, CambioError::Validation(_)));
    }

    #[test]
    fn test_negative_amount_rejected_before_any_request() {
        let client = RateClient::with_config("http://invalid.localhost", DEFAULT_TIMEOUT).unwrap();
        let err = client
            .fetch_latest(-1.0, Currency::EUR, Currency::BRL)
            .unwrap_err();
        assert!(matches!(err, CambioError::Validation(_)));
    }
}
