//! Exchange-rate system
//!
//! Everything the converter knows about rates lives here.
//!
//! # Components
//!
//! - **source**: the [`RateSource`] trait and shared range validation
//! - **client**: blocking HTTP client for the rate provider
//! - **cache**: per-session memoization of rate queries
//! - **csv_loader**: offline CSV rate tables with heuristic column detection
//! - **in_memory**: preloaded rates for tests and offline use
//! - **exploding**: testing stub that panics on any rate lookup

pub mod cache;
pub mod client;
pub mod csv_loader;
pub mod exploding;
pub mod in_memory;
pub mod source;

pub use cache::{CacheKey, ResultCache};
pub use client::RateClient;
pub use csv_loader::{filter_by_currency, sort_by_rate, CsvRateLoader, CsvRateRow};
pub use exploding::ExplodingRateSource;
pub use in_memory::InMemoryRateSource;
pub use source::{validate_range, RateSource};
