//! # cambio
//!
//! Currency-conversion core: latest-rate conversion and historical series
//! against a public rate provider, per-session result caching, offline CSV
//! rate tables, a bounded conversion history and curiosity/tip content
//! selection.
//!
//! All state lives in an explicit [`session::Session`]; there are no process
//! globals, so independent sessions never share caches or history.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cambio::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut session = Session::new(SessionConfig::default())?;
//!
//!     let result = session.convert(5.0, Currency::EUR, Currency::BRL)?;
//!     println!("= {:.2} {}", result.converted, result.request.target);
//!     session.append_history(&result);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod content;
pub mod currency;
pub mod error;
pub mod history;
pub mod rates;
pub mod session;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::config::SessionConfig;
    pub use crate::content::{ContentSelector, Language};
    pub use crate::currency::Currency;
    pub use crate::error::{CambioError, Result};
    pub use crate::history::{HistoryEntry, HistoryLedger};
    pub use crate::rates::{CsvRateLoader, CsvRateRow, RateClient, RateSource, ResultCache};
    pub use crate::session::Session;
    pub use crate::types::{ConversionRequest, ConversionResult, RateSeries, RateSeriesPoint};
}
