//! Store operation error types
//!
//! Most operations absorb these after logging and return a degraded
//! result; only upsert propagates them to the caller. The absorbed
//! error is preserved as the outcome's diagnostic so strict callers can
//! still see it.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by the underlying document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A read (find/count) failed
    #[error("query failed: {0}")]
    Query(String),

    /// A write (insert/upsert/update/remove) failed
    #[error("write failed: {0}")]
    Write(String),

    /// The store rejected the requested sort keys
    #[error("unsupported sort specification: {0}")]
    UnsupportedSort(String),

    /// No document matched the filter (update only; removal treats this
    /// as success)
    #[error("no document matched the filter")]
    NotFound,

    /// Record could not be serialized to or from a document
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this is the benign "nothing matched" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
