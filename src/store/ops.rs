//! RecordStore operations
//!
//! The stateless operation set over Model records. Each operation
//! acquires a fresh session from the connection manager, scopes to the
//! named database and collection, performs one store call (or one
//! batch), and releases the session on every exit path by dropping it.
//!
//! Failure policy: only upsert surfaces a hard error, because it is the
//! path that keeps the one-record-per-model invariant. Everything else
//! is best-effort: failures are logged once and absorbed into a
//! degraded result carrying the diagnostic.

use std::sync::Arc;

use serde_json::Value;

use crate::connection::{ConnectionManager, Document, SortKey, StoreBackend, StoreSession};
use crate::observability::Logger;

use super::errors::StoreResult;
use super::outcome::{CountOutcome, QueryOutcome, WriteOutcome};
use super::record::Record;

/// Identity field used as the upsert selector key.
const UPSERT_KEY: &str = "model";

/// Stateless operation set over Model records.
///
/// Holds only a shared reference to the connection manager; cloning a
/// `RecordStore` is cheap and clones share the same base connection.
pub struct RecordStore<B: StoreBackend> {
    manager: Arc<ConnectionManager<B>>,
}

impl<B: StoreBackend> Clone for RecordStore<B> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
        }
    }
}

impl<B: StoreBackend> RecordStore<B> {
    /// Creates a record store over the given connection manager.
    pub fn new(manager: Arc<ConnectionManager<B>>) -> Self {
        Self { manager }
    }

    /// Inserts records independently; one failing insert does not stop
    /// the rest of the batch. Per-record failures are logged, and only
    /// the first is kept as the outcome's diagnostic.
    pub fn insert(&self, database: &str, collection: &str, records: &[Record]) -> WriteOutcome {
        let mut session = self.manager.connect();
        let mut applied = 0;
        let mut first_failure = None;

        for record in records {
            let result = record
                .to_document()
                .and_then(|doc| session.insert_one(database, collection, doc));
            match result {
                Ok(()) => applied += 1,
                Err(err) => {
                    Logger::error(
                        "STORE_INSERT_FAILED",
                        &[
                            ("database", database),
                            ("collection", collection),
                            ("record", &record.name),
                            ("error", &err.to_string()),
                        ],
                    );
                    first_failure.get_or_insert(err);
                }
            }
        }

        match first_failure {
            Some(err) => WriteOutcome::with_diagnostic(applied, err),
            None => WriteOutcome::new(applied),
        }
    }

    /// Upserts records keyed by name: replaces the document matching
    /// `{model: name}` or creates it if absent.
    ///
    /// Records with an empty name are logged and skipped without
    /// aborting the batch. Unlike insert, the first hard error aborts
    /// the remaining batch and is returned.
    pub fn upsert(&self, database: &str, collection: &str, records: &[Record]) -> StoreResult<()> {
        let mut session = self.manager.connect();

        for record in records {
            if record.name.is_empty() {
                Logger::warn(
                    "STORE_UPSERT_SKIPPED",
                    &[
                        ("database", database),
                        ("collection", collection),
                        ("reason", "record has no model name"),
                    ],
                );
                continue;
            }

            let mut filter = Document::new();
            filter.insert(UPSERT_KEY.to_string(), Value::String(record.name.clone()));

            let result = record
                .to_document()
                .and_then(|doc| session.upsert(database, collection, &filter, doc));
            if let Err(err) = result {
                Logger::error(
                    "STORE_UPSERT_FAILED",
                    &[
                        ("database", database),
                        ("collection", collection),
                        ("record", &record.name),
                        ("error", &err.to_string()),
                    ],
                );
                return Err(err);
            }
        }

        Ok(())
    }

    /// Finds matching records in the store's natural order, skipping
    /// `skip` documents and applying `limit` only when it is greater
    /// than zero. Errors are absorbed: the outcome reads empty, with
    /// the diagnostic attached.
    pub fn get(
        &self,
        database: &str,
        collection: &str,
        filter: &Document,
        skip: usize,
        limit: usize,
    ) -> QueryOutcome {
        let mut session = self.manager.connect();
        match session.find(database, collection, filter, skip, limit) {
            Ok(documents) => QueryOutcome::clean(self.decode(database, collection, documents)),
            Err(err) => {
                Logger::error(
                    "STORE_QUERY_FAILED",
                    &[
                        ("database", database),
                        ("collection", collection),
                        ("error", &err.to_string()),
                    ],
                );
                QueryOutcome::failed(err)
            }
        }
    }

    /// Finds matching records ordered by the given keys (leading `-`
    /// marks descending).
    ///
    /// A rejected sort is downgraded, not an error: the same filter is
    /// re-fetched unsorted on the same session and the outcome is
    /// flagged degraded. If the unsorted fallback also fails, the
    /// outcome reads empty.
    pub fn get_sorted(
        &self,
        database: &str,
        collection: &str,
        filter: &Document,
        sort_keys: &[&str],
    ) -> QueryOutcome {
        let keys: Vec<SortKey> = sort_keys.iter().map(|raw| SortKey::parse(raw)).collect();

        let mut session = self.manager.connect();
        let sort_err = match session.find_sorted(database, collection, filter, &keys) {
            Ok(documents) => {
                return QueryOutcome::clean(self.decode(database, collection, documents))
            }
            Err(err) => err,
        };

        // Two-stage strategy: the sorted fetch failed, fall back to the
        // same filter unsorted.
        Logger::warn(
            "STORE_SORT_FALLBACK",
            &[
                ("database", database),
                ("collection", collection),
                ("error", &sort_err.to_string()),
            ],
        );
        match session.find(database, collection, filter, 0, 0) {
            Ok(documents) => {
                QueryOutcome::degraded(self.decode(database, collection, documents), sort_err)
            }
            Err(err) => {
                Logger::error(
                    "STORE_QUERY_FAILED",
                    &[
                        ("database", database),
                        ("collection", collection),
                        ("error", &err.to_string()),
                    ],
                );
                QueryOutcome::failed(err)
            }
        }
    }

    /// Replaces the first document matching `filter` in place. Failure
    /// (including "nothing matched") is logged, not surfaced.
    pub fn update(
        &self,
        database: &str,
        collection: &str,
        filter: &Document,
        change: &Document,
    ) -> WriteOutcome {
        let mut session = self.manager.connect();
        match session.update_first(database, collection, filter, change) {
            Ok(()) => WriteOutcome::new(1),
            Err(err) => {
                Logger::error(
                    "STORE_UPDATE_FAILED",
                    &[
                        ("database", database),
                        ("collection", collection),
                        ("error", &err.to_string()),
                    ],
                );
                WriteOutcome::with_diagnostic(0, err)
            }
        }
    }

    /// Counts matching documents. A failed count reads zero, with the
    /// diagnostic attached.
    pub fn count(&self, database: &str, collection: &str, filter: &Document) -> CountOutcome {
        let mut session = self.manager.connect();
        match session.count(database, collection, filter) {
            Ok(count) => CountOutcome::new(count),
            Err(err) => {
                Logger::error(
                    "STORE_COUNT_FAILED",
                    &[
                        ("database", database),
                        ("collection", collection),
                        ("error", &err.to_string()),
                    ],
                );
                CountOutcome::failed(err)
            }
        }
    }

    /// Removes all documents matching `filter`. Zero matches is
    /// success; any other failure is logged, not surfaced.
    pub fn remove(&self, database: &str, collection: &str, filter: &Document) -> WriteOutcome {
        let mut session = self.manager.connect();
        match session.remove_all(database, collection, filter) {
            Ok(removed) => WriteOutcome::new(removed),
            Err(err) if err.is_not_found() => WriteOutcome::new(0),
            Err(err) => {
                Logger::error(
                    "STORE_REMOVE_FAILED",
                    &[
                        ("database", database),
                        ("collection", collection),
                        ("error", &err.to_string()),
                    ],
                );
                WriteOutcome::with_diagnostic(0, err)
            }
        }
    }

    /// Decodes stored documents into records, logging and skipping any
    /// document that does not decode.
    fn decode(&self, database: &str, collection: &str, documents: Vec<Document>) -> Vec<Record> {
        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            match Record::from_document(document) {
                Ok(record) => records.push(record),
                Err(err) => {
                    Logger::error(
                        "STORE_DECODE_FAILED",
                        &[
                            ("database", database),
                            ("collection", collection),
                            ("error", &err.to_string()),
                        ],
                    );
                }
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::memory::MemoryBackend;
    use serde_json::json;

    const DB: &str = "ml";
    const COLL: &str = "models";

    fn store() -> RecordStore<MemoryBackend> {
        let manager = Arc::new(ConnectionManager::new(
            MemoryBackend::new(),
            StoreConfig::new("mem://test"),
        ));
        RecordStore::new(manager)
    }

    fn filter(value: serde_json::Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("filter must be an object"),
        }
    }

    #[test]
    fn test_insert_then_count() {
        let store = store();
        let records = vec![
            Record::new("modelA", "classifier"),
            Record::new("modelB", "regressor"),
        ];
        let outcome = store.insert(DB, COLL, &records);
        assert_eq!(outcome.applied(), 2);
        assert!(outcome.is_clean());
        assert_eq!(store.count(DB, COLL, &Document::new()).get(), 2);
    }

    #[test]
    fn test_get_by_name() {
        let store = store();
        store.insert(
            DB,
            COLL,
            &[Record::new("modelA", "classifier").with_meta("acc", json!(0.9))],
        );

        let outcome = store.get(DB, COLL, &filter(json!({"name": "modelA"})), 0, 0);
        assert!(outcome.is_clean());
        assert_eq!(outcome.records().len(), 1);
        assert_eq!(outcome.records()[0].meta["acc"], json!(0.9));
    }

    #[test]
    fn test_upsert_empty_name_skipped_batch_continues() {
        let store = store();
        let records = vec![
            Record::new("", "classifier"),
            Record::new("modelB", "regressor"),
        ];
        store.upsert(DB, COLL, &records).unwrap();

        // Only the named record landed.
        assert_eq!(store.count(DB, COLL, &Document::new()).get(), 1);
        let found = store.get(DB, COLL, &filter(json!({"name": "modelB"})), 0, 0);
        assert_eq!(found.records().len(), 1);
    }

    #[test]
    fn test_update_replaces_first_match() {
        let store = store();
        store.insert(DB, COLL, &[Record::new("modelA", "classifier")]);

        let change = filter(json!({"name": "modelA", "type": "ranker", "meta": {}}));
        let outcome = store.update(DB, COLL, &filter(json!({"name": "modelA"})), &change);
        assert!(outcome.is_clean());

        let found = store.get(DB, COLL, &filter(json!({"name": "modelA"})), 0, 0);
        assert_eq!(found.records()[0].kind, "ranker");
    }

    #[test]
    fn test_update_without_match_is_absorbed() {
        let store = store();
        let outcome = store.update(
            DB,
            COLL,
            &filter(json!({"name": "ghost"})),
            &filter(json!({"name": "ghost"})),
        );
        assert_eq!(outcome.applied(), 0);
        assert!(outcome.diagnostic().is_some());
    }

    #[test]
    fn test_remove_zero_matches_is_success() {
        let store = store();
        let outcome = store.remove(DB, COLL, &filter(json!({"name": "ghost"})));
        assert_eq!(outcome.applied(), 0);
        assert!(outcome.is_clean());
    }
}
