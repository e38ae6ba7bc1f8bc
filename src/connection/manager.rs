//! Connection lifecycle
//!
//! One shared base connection per manager, dialed lazily on first use
//! with Strong consistency and never explicitly torn down. Every call
//! hands out an independent session cloned from the base connection;
//! the caller releases it by dropping it.

use std::sync::{Mutex, PoisonError};

use crate::config::StoreConfig;
use crate::observability::Logger;

use super::errors::{ConnectionError, ConnectionResult};
use super::session::{ConsistencyMode, StoreBackend, StoreConnection};

/// The session type a backend's connections hand out.
pub type SessionOf<B> = <<B as StoreBackend>::Connection as StoreConnection>::Session;

/// Owns the lazily-dialed shared connection to the document store.
///
/// Constructed once at the composition root and shared (by `Arc`) with
/// every component needing store access. There is no process-global
/// instance; tests substitute an in-memory or failing backend through
/// the same constructor.
pub struct ConnectionManager<B: StoreBackend> {
    backend: B,
    config: StoreConfig,
    base: Mutex<Option<B::Connection>>,
}

impl<B: StoreBackend> ConnectionManager<B> {
    /// Creates a manager; the endpoint is not dialed until first use.
    pub fn new(backend: B, config: StoreConfig) -> Self {
        Self {
            backend,
            config,
            base: Mutex::new(None),
        }
    }

    /// Returns a ready-to-use session.
    ///
    /// The first call dials the configured endpoint and fixes the
    /// consistency mode to Strong. Every call, including the first,
    /// returns an independent session, never the base connection.
    ///
    /// # Panics
    ///
    /// Aborts the process if the dial cannot establish a connection.
    /// This is deliberate fail-fast policy: the service cannot operate
    /// without the store, and there is no retry or backoff.
    pub fn connect(&self) -> SessionOf<B> {
        match self.try_connect() {
            Ok(session) => session,
            Err(err) => {
                Logger::fatal(
                    "STORE_DIAL_FAILED",
                    &[("uri", &self.config.uri), ("error", &err.to_string())],
                );
                panic!("cannot establish store connection: {}", err);
            }
        }
    }

    /// Non-aborting variant of [`connect`](Self::connect) for callers
    /// that pre-flight the store at startup.
    pub fn try_connect(&self) -> ConnectionResult<SessionOf<B>> {
        let mut base = self.base.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(conn) = base.as_ref() {
            return Ok(conn.session());
        }

        if !self.config.is_configured() {
            return Err(ConnectionError::NotConfigured);
        }

        let conn = self.backend.dial(&self.config.uri, ConsistencyMode::Strong)?;
        Logger::info("STORE_CONNECTED", &[("uri", &self.config.uri)]);
        let session = conn.session();
        *base = Some(conn);
        Ok(session)
    }

    /// Whether the base connection has been established.
    pub fn is_connected(&self) -> bool {
        self.base
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
