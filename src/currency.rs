//! Currency codes supported by the converter

use crate::error::{CambioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies (ISO 4217 codes)
///
/// The set is deliberately closed: every other code is rejected during
/// parsing, before any request reaches the rate provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// Brazilian Real
    BRL,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::BRL => "BRL",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::BRL => "R$",
            Currency::GBP => "£",
            Currency::JPY => "¥",
        }
    }

    /// Parse from ISO code, case-insensitively
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "BRL" => Ok(Currency::BRL),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            other => Err(CambioError::Validation(format!(
                "Unknown currency code: {}",
                other
            ))),
        }
    }

    /// All supported currencies
    pub fn all() -> Vec<Currency> {
        vec![
            Currency::USD,
            Currency::EUR,
            Currency::BRL,
            Currency::GBP,
            Currency::JPY,
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CambioError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::from_code(s)
    }
}
