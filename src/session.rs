//! Conversion session - the facade the presentation layer talks to
//!
//! A `Session` owns everything that used to be ambient process state: the
//! rate source, the result caches, the history ledger and the content
//! selector. One session per logical user; sessions never share state, so
//! concurrent users cannot cross-talk.

use crate::config::SessionConfig;
use crate::content::{ContentSelector, Language};
use crate::currency::Currency;
use crate::error::Result;
use crate::history::{HistoryEntry, HistoryLedger};
use crate::rates::cache::{CacheKey, ResultCache};
use crate::rates::client::RateClient;
use crate::rates::csv_loader::{CsvRateLoader, CsvRateRow};
use crate::rates::source::{validate_range, RateSource};
use crate::types::{ConversionRequest, ConversionResult, RateSeries};
use chrono::NaiveDate;
use std::io::Read;

/// A single user's conversion session
pub struct Session {
    source: Box<dyn RateSource>,
    latest_cache: ResultCache<ConversionResult>,
    series_cache: ResultCache<RateSeries>,
    history: HistoryLedger,
    content: ContentSelector,
    config: SessionConfig,
}

impl Session {
    /// Session backed by the HTTP rate provider from `config`
    pub fn new(config: SessionConfig) -> Result<Self> {
        let client = RateClient::with_config(config.base_url.clone(), config.timeout())?;
        Ok(Self::with_source(Box::new(client), config))
    }

    /// Session over an arbitrary rate source
    pub fn with_source(source: Box<dyn RateSource>, config: SessionConfig) -> Self {
        let content = ContentSelector::from_file(&config.curiosities_path);
        let history = HistoryLedger::with_capacity(config.history_capacity);

        Self {
            source,
            latest_cache: ResultCache::new(),
            series_cache: ResultCache::new(),
            history,
            content,
            config,
        }
    }

    /// Convert `amount` from `source` to `target` at the latest rate.
    ///
    /// Validation and the identity shortcut run before the cache and the
    /// source, so bad input and same-currency requests never cause traffic.
    /// Repeating an identical request is answered from the cache.
    pub fn convert(
        &mut self,
        amount: f64,
        source: Currency,
        target: Currency,
    ) -> Result<ConversionResult> {
        let request = ConversionRequest::new(amount, source, target);
        request.validate()?;

        if source == target {
            return Ok(ConversionResult::new(request, amount));
        }

        let key = CacheKey::latest(amount, source, target);
        let rate_source = self.source.as_ref();
        self.latest_cache
            .get_or_compute(key, || rate_source.fetch_latest(amount, source, target))
    }

    /// Historical rates over the inclusive `[start, end]` range.
    ///
    /// An inverted range is a validation error raised before any I/O; a
    /// period the provider has no data for comes back as an empty series.
    pub fn series(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        source: Currency,
        target: Currency,
    ) -> Result<RateSeries> {
        validate_range(start, end)?;

        let key = CacheKey::series(start, end, source, target);
        let rate_source = self.source.as_ref();
        self.series_cache
            .get_or_compute(key, || rate_source.fetch_series(start, end, source, target))
    }

    /// Load the session's configured rate table; an absent file is an empty
    /// table.
    pub fn load_csv(&self) -> Result<Vec<CsvRateRow>> {
        CsvRateLoader::load_default_from(&self.config.rates_path)
    }

    /// Load a rate table from an uploaded buffer
    pub fn load_csv_from<R: Read>(&self, reader: R) -> Result<Vec<CsvRateRow>> {
        CsvRateLoader::load_reader(reader)
    }

    /// Record a completed conversion in the history ledger
    pub fn append_history(&mut self, result: &ConversionResult) {
        self.history.append(HistoryEntry::from_result(result));
    }

    /// Up to `n` most recent conversions, newest first
    pub fn recent_history(&self, n: usize) -> Vec<&HistoryEntry> {
        self.history.recent(n)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Curiosity of the day for a currency
    pub fn curiosity(&self, currency: Currency, day: NaiveDate) -> String {
        self.content.curiosity_for(currency, day)
    }

    /// A tip in the session's configured language
    pub fn tip(&self, currency: Currency) -> String {
        self.content.tip_for(currency, self.config.language)
    }

    /// A tip in an explicit language
    pub fn tip_in(&self, currency: Currency, language: Language) -> String {
        self.content.tip_for(currency, language)
    }

    /// Drop all cached rate queries
    pub fn invalidate_caches(&mut self) {
        self.latest_cache.clear();
        self.series_cache.clear();
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
