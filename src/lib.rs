//! modelstore - document-store access layer for ML model metadata
//!
//! Persists, queries, updates, and removes small structured records
//! describing machine-learning models, and renders HTML views of that
//! data via a cached template engine.

pub mod config;
pub mod connection;
pub mod memory;
pub mod observability;
pub mod store;
pub mod templates;

pub use config::StoreConfig;
pub use connection::{ConnectionManager, ConsistencyMode, StoreBackend, StoreConnection, StoreSession};
pub use memory::MemoryBackend;
pub use store::{Record, RecordStore, StoreError};
pub use templates::{CachePolicy, TemplateData, TemplateEngine};
