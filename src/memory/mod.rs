//! In-memory document-store backend
//!
//! The crate's default backend and the substitutable store used by
//! tests: full document-store semantics (insert, upsert, filtered find
//! with skip/limit, multi-key sort, update, count, remove) over plain
//! process memory. Dial it with a `mem://` endpoint.

mod backend;
mod filters;
mod sorter;

pub use backend::{MemoryBackend, MemoryConnection, MemorySession};
