//! Connection error types
//!
//! Connection establishment is the only fatal failure class in this
//! layer: the service cannot operate without the store, so there is no
//! retry or backoff anywhere downstream of these errors.

use thiserror::Error;

/// Result type for connection operations
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Errors raised while establishing the shared store connection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    /// No endpoint URI was supplied by configuration
    #[error("store endpoint is not configured")]
    NotConfigured,

    /// The endpoint could not be dialed
    #[error("failed to dial store endpoint {uri}: {reason}")]
    DialFailed { uri: String, reason: String },
}

impl ConnectionError {
    /// Create a dial failure for the given endpoint.
    pub fn dial_failed(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        ConnectionError::DialFailed {
            uri: uri.into(),
            reason: reason.into(),
        }
    }
}
