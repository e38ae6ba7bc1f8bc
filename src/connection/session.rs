//! Backend and session traits
//!
//! The substitutable-store seam: `ConnectionManager` is generic over a
//! `StoreBackend`, so the in-memory backend used in production of this
//! layer and any failing stand-in used by tests slot in through the same
//! three traits.

use crate::store::StoreError;

/// A document as handed to the backend: an open string-to-value map.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Session consistency mode.
///
/// This layer always dials with [`ConsistencyMode::Strong`]: every read
/// observes the most recent acknowledged write. `Monotonic` exists for
/// backends that distinguish the modes but is never requested here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyMode {
    /// Every read reflects all prior acknowledged writes.
    Strong,
    /// Reads may lag writes but never go backwards.
    Monotonic,
}

/// Sort direction for a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A parsed sort key: field name plus direction.
///
/// The raw form uses a leading `-` to mark descending order
/// (`"-name"` sorts by `name` descending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Parses a raw key, honoring the leading `-` descending marker.
    ///
    /// An empty field name is preserved as-is; the backend rejects it as
    /// an unsupported sort.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(field) => Self::desc(field),
            None => Self::asc(raw),
        }
    }
}

/// Dials the shared base connection.
pub trait StoreBackend: Send + Sync + 'static {
    type Connection: StoreConnection;

    /// Establishes the base connection to the given endpoint.
    fn dial(&self, uri: &str, mode: ConsistencyMode) -> Result<Self::Connection, super::ConnectionError>;
}

/// The shared base connection.
///
/// Must be safe for concurrent session cloning; the sessions it hands
/// out are independent of each other.
pub trait StoreConnection: Send + Sync {
    type Session: StoreSession;

    /// Clones an independent logical session off the base connection.
    fn session(&self) -> Self::Session;
}

/// One logical session, used for one operation (or one batch) and
/// released on drop. Every operation scopes to explicit database and
/// collection names; no default is assumed.
pub trait StoreSession {
    /// Inserts a single document.
    fn insert_one(&mut self, database: &str, collection: &str, document: Document)
        -> Result<(), StoreError>;

    /// Replaces the first document matching `filter`, or inserts if none
    /// matches. Either way the stored document carries the filter's
    /// equality fields, so the identity selector keeps matching.
    fn upsert(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
        document: Document,
    ) -> Result<(), StoreError>;

    /// Finds matching documents in natural order, skipping `skip` and
    /// applying `limit` only when it is greater than zero.
    fn find(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;

    /// Finds matching documents ordered by the given keys.
    fn find_sorted(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
        keys: &[SortKey],
    ) -> Result<Vec<Document>, StoreError>;

    /// Replaces the first document matching `filter` in place.
    /// No match is a [`StoreError::NotFound`].
    fn update_first(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
        change: &Document,
    ) -> Result<(), StoreError>;

    /// Counts matching documents.
    fn count(&mut self, database: &str, collection: &str, filter: &Document)
        -> Result<u64, StoreError>;

    /// Removes all matching documents, returning how many were removed.
    /// Zero matches is success, not an error.
    fn remove_all(&mut self, database: &str, collection: &str, filter: &Document)
        -> Result<u64, StoreError>;
}
