//! Connection subsystem
//!
//! Owns the lazily-dialed shared connection to the document store and
//! hands out an independent cloned session per operation. Dial failure
//! is fatal by policy; everything downstream assumes a reachable store.
//!
//! # Invariants
//!
//! - The base connection is dialed at most once per manager.
//! - Consistency mode is fixed to Strong at first dial.
//! - Callers never receive the base connection, only clones.

mod errors;
mod manager;
mod session;

pub use errors::{ConnectionError, ConnectionResult};
pub use manager::{ConnectionManager, SessionOf};
pub use session::{
    ConsistencyMode, Document, SortDirection, SortKey, StoreBackend, StoreConnection, StoreSession,
};
