//! Offline CSV rate tables
//!
//! Loads currency/rate pairs from an uploaded buffer or a well-known local
//! file. Legacy tables come in several shapes, so the loader sniffs the
//! delimiter and finds the currency and rate columns by header name, falling
//! back to the first two columns. Rows that fail coercion are dropped: this
//! is data cleaning, not validation.

use crate::currency::Currency;
use crate::error::Result;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Well-known rate table consulted when no explicit source is given
pub const DEFAULT_RATES_PATH: &str = "rates.csv";

/// Header names recognized as the currency column
const CURRENCY_HEADERS: [&str; 4] = ["moeda", "par", "moneda", "currency"];

/// Header names recognized as the rate column
const RATE_HEADERS: [&str; 3] = ["taxa", "cambio", "rate"];

/// One usable row of a rate table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsvRateRow {
    pub currency: Currency,
    pub rate: f64,
}

/// Loader for offline rate tables
pub struct CsvRateLoader;

impl CsvRateLoader {
    /// Load the default table. An absent file is the normal "waiting for
    /// input" state and yields an empty table.
    pub fn load_default() -> Result<Vec<CsvRateRow>> {
        Self::load_default_from(DEFAULT_RATES_PATH)
    }

    /// Same as [`load_default`](Self::load_default) against a configured path.
    pub fn load_default_from<P: AsRef<Path>>(path: P) -> Result<Vec<CsvRateRow>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::load_path(path)
    }

    /// Load an explicit file
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<CsvRateRow>> {
        let mut text = String::new();
        File::open(path)?.read_to_string(&mut text)?;
        Ok(Self::parse(&text))
    }

    /// Load from an uploaded buffer
    pub fn load_reader<R: Read>(mut reader: R) -> Result<Vec<CsvRateRow>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::parse(&text))
    }

    /// Parse CSV text into usable rows, preserving source row order.
    pub fn parse(text: &str) -> Vec<CsvRateRow> {
        let delimiter = sniff_delimiter(text);
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers().map(|h| h.clone()).ok();
        let (currency_idx, rate_idx) = headers
            .as_ref()
            .map(detect_columns)
            .unwrap_or((0, 1));

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("Skipping unreadable CSV record: {}", e);
                    continue;
                }
            };

            let currency_cell = record.get(currency_idx).unwrap_or("").trim();
            let currency = match Currency::from_code(currency_cell) {
                Ok(currency) => currency,
                Err(_) => {
                    log::debug!("Dropping row with unusable currency {:?}", currency_cell);
                    continue;
                }
            };

            let rate_cell = record.get(rate_idx).unwrap_or("").trim();
            let rate = match parse_rate(rate_cell) {
                Some(rate) => rate,
                None => {
                    log::debug!("Dropping row with unusable rate {:?}", rate_cell);
                    continue;
                }
            };

            rows.push(CsvRateRow { currency, rate });
        }

        rows
    }
}

/// Pick the delimiter from the header line: semicolon when it dominates,
/// comma otherwise.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    let commas = header.matches(',').count();
    let semicolons = header.matches(';').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Find the currency and rate columns by header name, case-insensitively.
/// Unmatched columns fall back to positions 0 and 1.
fn detect_columns(headers: &StringRecord) -> (usize, usize) {
    let mut currency_idx = None;
    let mut rate_idx = None;

    for (idx, name) in headers.iter().enumerate() {
        let name = name.trim().to_lowercase();
        if currency_idx.is_none() && CURRENCY_HEADERS.contains(&name.as_str()) {
            currency_idx = Some(idx);
        } else if rate_idx.is_none() && RATE_HEADERS.contains(&name.as_str()) {
            rate_idx = Some(idx);
        }
    }

    (currency_idx.unwrap_or(0), rate_idx.unwrap_or(1))
}

/// Coerce a rate cell, accepting a decimal comma ("1,10" -> 1.10).
fn parse_rate(cell: &str) -> Option<f64> {
    let normalized = cell.replace(',', ".");
    normalized.parse::<f64>().ok().filter(|rate| rate.is_finite())
}

/// Rows whose currency code contains `needle`, case-insensitively.
/// Applied by the caller, never inside `load`.
pub fn filter_by_currency(rows: &[CsvRateRow], needle: &str) -> Vec<CsvRateRow> {
    let needle = needle.trim().to_uppercase();
    rows.iter()
        .copied()
        .filter(|row| row.currency.code().contains(&needle))
        .collect()
}

/// Sort rows in place by rate value. Stable, so equal rates keep their
/// source order.
pub fn sort_by_rate(rows: &mut [CsvRateRow], descending: bool) {
    rows.sort_by(|a, b| {
        let ord = a
            .rate
            .partial_cmp(&b.rate)
            .unwrap_or(std::cmp::Ordering::Equal);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}
