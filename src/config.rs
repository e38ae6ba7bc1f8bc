//! Store endpoint configuration
//!
//! A single connection-string value supplied by external configuration
//! and consumed once, at the first dial. No default endpoint is assumed:
//! an unconfigured URI fails the dial, not some implicit localhost.

use std::env;

/// Environment variable holding the store endpoint URI.
pub const DB_URI_ENV: &str = "MODELSTORE_DB_URI";

/// Configuration for the document-store connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store endpoint URI (e.g. `mem://local` for the in-memory backend).
    pub uri: String,
}

impl StoreConfig {
    /// Creates a config with the given endpoint URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Reads the endpoint URI from `MODELSTORE_DB_URI`.
    ///
    /// An unset variable yields an unconfigured config; the dial will
    /// reject it.
    pub fn from_env() -> Self {
        Self {
            uri: env::var(DB_URI_ENV).unwrap_or_default(),
        }
    }

    /// Whether an endpoint URI has been supplied.
    pub fn is_configured(&self) -> bool {
        !self.uri.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconfigured() {
        let config = StoreConfig::default();
        assert!(!config.is_configured());
    }

    #[test]
    fn test_new_sets_uri() {
        let config = StoreConfig::new("mem://local");
        assert_eq!(config.uri, "mem://local");
        assert!(config.is_configured());
    }
}
