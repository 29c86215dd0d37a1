//! Result cache - per-session memoization of rate queries
//!
//! Keys cover every parameter of a query, so changing the amount or a date
//! changes the key. Only successful results are stored; a failed query can
//! be retried with the same parameters.

use crate::currency::Currency;
use crate::error::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Cache key derived from all parameters of a rate query
///
/// The amount participates through its bit pattern so the key stays
/// `Eq + Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Latest {
        amount_bits: u64,
        source: Currency,
        target: Currency,
    },
    Series {
        start: NaiveDate,
        end: NaiveDate,
        source: Currency,
        target: Currency,
    },
}

impl CacheKey {
    pub fn latest(amount: f64, source: Currency, target: Currency) -> Self {
        CacheKey::Latest {
            amount_bits: amount.to_bits(),
            source,
            target,
        }
    }

    pub fn series(start: NaiveDate, end: NaiveDate, source: Currency, target: Currency) -> Self {
        CacheKey::Series {
            start,
            end,
            source,
            target,
        }
    }
}

/// Memoizes successful rate queries for the lifetime of a session
///
/// No TTL: parameter identity is the only invalidation signal, beyond an
/// explicit `invalidate` or `clear`.
#[derive(Debug)]
pub struct ResultCache<V> {
    entries: HashMap<CacheKey, V>,
    hits: u64,
    misses: u64,
}

impl<V> Default for ResultCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<V: Clone> ResultCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `compute`, store a
    /// successful result and return it. Errors propagate uncached.
    pub fn get_or_compute<F>(&mut self, key: CacheKey, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.entries.get(&key) {
            self.hits += 1;
            log::debug!("Cache hit for {:?}", key);
            return Ok(value.clone());
        }

        let value = compute()?;
        self.misses += 1;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Drop a single entry. Returns whether it was present.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
