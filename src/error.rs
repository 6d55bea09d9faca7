//! Error taxonomy shared by all engines
//!
//! Every error is fatal to the run that produced it and nothing else.
//! Retries, if any, belong to the caller. Degenerate numeric inputs
//! (zero variance, empty trade log) are NOT errors: engines return
//! neutral values for those.

use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing strategy parameters
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Requested window/lookback exceeds available history
    #[error("insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },
    /// Malformed input records (non-monotonic timestamps, bad OHLC, ...)
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a `Config` error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Shorthand for a `Validation` error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
