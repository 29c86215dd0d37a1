//! Session configuration

use crate::content::{Language, DEFAULT_CURIOSITIES_PATH};
use crate::error::Result;
use crate::history::DEFAULT_CAPACITY;
use crate::rates::client::DEFAULT_BASE_URL;
use crate::rates::csv_loader::DEFAULT_RATES_PATH;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables for a conversion session
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Rate provider endpoint
    pub base_url: String,
    /// Provider request timeout, in seconds
    pub timeout_secs: u64,
    /// History ledger retention bound
    pub history_capacity: usize,
    /// Well-known CSV rate table
    pub rates_path: PathBuf,
    /// Curiosity text resource
    pub curiosities_path: PathBuf,
    /// Language for tip pools
    pub language: Language,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            history_capacity: DEFAULT_CAPACITY,
            rates_path: PathBuf::from(DEFAULT_RATES_PATH),
            curiosities_path: PathBuf::from(DEFAULT_CURIOSITIES_PATH),
            language: Language::default(),
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file; missing keys fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"timeout_secs": 5, "language": "pt"}"#).unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.language, Language::Pt);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
