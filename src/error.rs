//! Error types for the conversion core

use thiserror::Error;

/// Main error type for the conversion core
///
/// Empty results (a series with no dated entries, an absent rate table, a
/// missing curiosity resource) are not errors; they come back as empty values
/// so callers can render "no data" rather than a failure.
#[derive(Error, Debug)]
pub enum CambioError {
    /// Network-level failure: DNS, refused connection, timeout, non-2xx status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered, but the payload was not in the expected shape
    #[error("Format error: {0}")]
    Format(String),

    /// Bad input rejected before any I/O is attempted
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias for conversion-core operations
pub type Result<T> = std::result::Result<T, CambioError>;
