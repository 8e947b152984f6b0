//! # Errors
//!
//! Failure taxonomy for list operations. Not-found and empty outcomes are
//! ordinary values (see `types`), only real faults live here.

use thiserror::Error;

/// A persistence call failed or did not finish in time.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store operation `{op}` timed out")]
    Timeout { op: &'static str },

    #[error("store backend error: {0}")]
    Backend(String),

    #[error("stored data has an unexpected shape: {0}")]
    Corrupt(String),

    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_timeout() {
            StoreError::Timeout { op: "redis" }
        } else if err.is_connection_dropped() || err.is_connection_refusal() {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

/// A command was shaped wrong before any store call was made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a list name is required")]
    MissingList,

    #[error("at least one item is required")]
    MissingItems,
}

/// Failure of a single-list operation: bad input or a store fault.
#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
