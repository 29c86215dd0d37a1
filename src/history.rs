//! Conversion history ledger
//!
//! Append-only, bounded record of completed conversions for the current
//! session. Entries are immutable once appended; once the retention bound is
//! reached, the oldest entry is evicted for each new one.

use crate::types::ConversionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default retention bound
pub const DEFAULT_CAPACITY: usize = 50;

/// A completed conversion rendered to its fixed display form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub line: String,
}

impl HistoryEntry {
    pub fn from_result(result: &ConversionResult) -> Self {
        Self {
            timestamp: result.timestamp,
            line: format!(
                "{} {} = {:.2} {}",
                result.request.amount, result.request.source, result.converted, result.request.target
            ),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.line
        )
    }
}

/// Bounded, append-only conversion log, reported newest first
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Ledger retaining at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry, evicting the oldest once the bound is exceeded.
    pub fn append(&mut self, entry: HistoryEntry) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Up to `n` most recent entries, newest first. Never more than the
    /// retention bound regardless of `n`.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            timestamp: Utc::now(),
            line: format!("entry {}", n),
        }
    }

    #[test]
    fn test_append_and_recent_newest_first() {
        let mut ledger = HistoryLedger::new();
        for n in 0..3 {
            ledger.append(entry(n));
        }

        let recent = ledger.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].line, "entry 2");
        assert_eq!(recent[1].line, "entry 1");
    }

    #[test]
    fn test_oldest_evicted_beyond_capacity() {
        let mut ledger = HistoryLedger::with_capacity(3);
        for n in 0..5 {
            ledger.append(entry(n));
        }

        assert_eq!(ledger.len(), 3);
        let lines: Vec<&str> = ledger.recent(10).iter().map(|e| e.line.as_str()).collect();
        assert_eq!(lines, vec!["entry 4", "entry 3", "entry 2"]);
    }

    #[test]
    fn test_recent_capped_by_retention_bound() {
        let mut ledger = HistoryLedger::with_capacity(3);
        for n in 0..10 {
            ledger.append(entry(n));
        }

        assert_eq!(ledger.recent(usize::MAX).len(), 3);
    }

    #[test]
    fn test_entry_rendering() {
        use crate::currency::Currency;
        use crate::types::{ConversionRequest, ConversionResult};

        let request = ConversionRequest::new(5.0, Currency::EUR, Currency::BRL);
        let result = ConversionResult::new(request, 27.35);
        let entry = HistoryEntry::from_result(&result);

        assert_eq!(entry.line, "5 EUR = 27.35 BRL");
    }

    proptest! {
        #[test]
        fn prop_ledger_never_exceeds_capacity(
            capacity in 1usize..64,
            appends in 0usize..200,
            n in 0usize..100,
        ) {
            let mut ledger = HistoryLedger::with_capacity(capacity);
            for i in 0..appends {
                ledger.append(entry(i));
            }

            prop_assert!(ledger.len() <= capacity);
            let recent = ledger.recent(n);
            prop_assert!(recent.len() <= n.min(capacity));

            // Newest first, and only the freshest survive.
            if appends > 0 && n > 0 {
                prop_assert_eq!(recent[0].line.clone(), format!("entry {}", appends - 1));
            }
        }
    }
}
