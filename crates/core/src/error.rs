//! Store error model.

use core::fmt::Display;

use thiserror::Error;

/// Result type returned by every backing-store port.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a single backing-store operation.
///
/// Only two outcomes are meaningful to callers: the identifier matched
/// nothing, or the store itself failed. `InvalidInput` covers payloads the
/// store refused to interpret (e.g. a document that cannot be encoded).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The identifier (or bucket/key) has no matching record.
    #[error("not found")]
    NotFound,

    /// The request payload could not be turned into a store operation.
    /// The message is for server-side logs only.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Driver/provider failure. `detail` is for server-side logs only.
    #[error("{operation} failed: {detail}")]
    Backend {
        operation: &'static str,
        detail: String,
    },
}

impl StoreError {
    pub fn backend(operation: &'static str, detail: impl Display) -> Self {
        Self::Backend {
            operation,
            detail: detail.to_string(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
