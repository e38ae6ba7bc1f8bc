//! In-memory document-store backend
//!
//! The substitutable store behind the connection seam: databases hold
//! named collections, collections hold documents in insertion order.
//! The base connection owns the state behind `Arc<RwLock<..>>`; every
//! session clones the `Arc`, so concurrent sessions are independent and
//! strong consistency holds trivially (every read takes the lock after
//! any acknowledged write).

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use uuid::Uuid;

use crate::connection::{
    ConnectionError, ConsistencyMode, Document, SortKey, StoreBackend, StoreConnection,
    StoreSession,
};
use crate::store::StoreError;

use super::{filters, sorter};

/// URI scheme accepted by the in-memory backend.
const SCHEME: &str = "mem://";

type Collections = HashMap<String, Vec<Document>>;
type Databases = HashMap<String, Collections>;

/// Backend factory for in-memory connections.
#[derive(Debug, Default)]
pub struct MemoryBackend;

impl MemoryBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StoreBackend for MemoryBackend {
    type Connection = MemoryConnection;

    /// "Dials" a fresh in-memory store. Only `mem://` endpoints are
    /// accepted; anything else is a dial failure, which the manager
    /// treats as fatal.
    fn dial(&self, uri: &str, _mode: ConsistencyMode) -> Result<MemoryConnection, ConnectionError> {
        if !uri.starts_with(SCHEME) {
            return Err(ConnectionError::dial_failed(
                uri,
                format!("unsupported endpoint scheme, expected {}", SCHEME),
            ));
        }
        Ok(MemoryConnection {
            databases: Arc::new(RwLock::new(Databases::new())),
        })
    }
}

/// The shared base connection: owns the store state.
pub struct MemoryConnection {
    databases: Arc<RwLock<Databases>>,
}

impl StoreConnection for MemoryConnection {
    type Session = MemorySession;

    fn session(&self) -> MemorySession {
        MemorySession {
            databases: Arc::clone(&self.databases),
        }
    }
}

/// An independent session handle sharing the connection's state.
#[derive(Debug)]
pub struct MemorySession {
    databases: Arc<RwLock<Databases>>,
}

impl MemorySession {
    fn read<T>(
        &self,
        database: &str,
        collection: &str,
        f: impl FnOnce(&[Document]) -> T,
    ) -> T {
        let databases = self.databases.read().unwrap_or_else(PoisonError::into_inner);
        let documents = databases
            .get(database)
            .and_then(|colls| colls.get(collection))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        f(documents)
    }

    fn write<T>(
        &self,
        database: &str,
        collection: &str,
        f: impl FnOnce(&mut Vec<Document>) -> T,
    ) -> T {
        let mut databases = self.databases.write().unwrap_or_else(PoisonError::into_inner);
        let documents = databases
            .entry(database.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default();
        f(documents)
    }

    /// Assigns a fresh `_id` unless the document already carries one.
    fn ensure_id(document: &mut Document) {
        document
            .entry("_id".to_string())
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
    }

    /// Copies the filter's plain-equality fields into the document so
    /// the identity selector keeps matching the stored document. A
    /// literal replace would strip the selector field and let a later
    /// upsert of the same name create a duplicate.
    fn merge_identity(filter: &Document, document: &mut Document) {
        for (field, value) in filter {
            if !filters::is_operator_object(value) && !document.contains_key(field) {
                document.insert(field.clone(), value.clone());
            }
        }
    }
}

impl StoreSession for MemorySession {
    fn insert_one(
        &mut self,
        database: &str,
        collection: &str,
        mut document: Document,
    ) -> Result<(), StoreError> {
        Self::ensure_id(&mut document);
        self.write(database, collection, |documents| documents.push(document));
        Ok(())
    }

    fn upsert(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
        mut document: Document,
    ) -> Result<(), StoreError> {
        Self::merge_identity(filter, &mut document);
        self.write(database, collection, |documents| {
            match documents.iter_mut().find(|doc| filters::matches(doc, filter)) {
                Some(existing) => {
                    // Replace, keeping the store-assigned identifier.
                    if let Some(id) = existing.get("_id").cloned() {
                        document.insert("_id".to_string(), id);
                    }
                    *existing = document;
                }
                None => {
                    Self::ensure_id(&mut document);
                    documents.push(document);
                }
            }
        });
        Ok(())
    }

    fn find(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self.read(database, collection, |documents| {
            let matching = documents
                .iter()
                .filter(|doc| filters::matches(doc, filter))
                .skip(skip)
                .cloned();
            if limit > 0 {
                matching.take(limit).collect()
            } else {
                matching.collect()
            }
        }))
    }

    fn find_sorted(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
        keys: &[SortKey],
    ) -> Result<Vec<Document>, StoreError> {
        let mut matching = self.read(database, collection, |documents| {
            documents
                .iter()
                .filter(|doc| filters::matches(doc, filter))
                .cloned()
                .collect::<Vec<_>>()
        });
        sorter::sort(&mut matching, keys)?;
        Ok(matching)
    }

    fn update_first(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
        change: &Document,
    ) -> Result<(), StoreError> {
        self.write(database, collection, |documents| {
            match documents.iter_mut().find(|doc| filters::matches(doc, filter)) {
                Some(existing) => {
                    let mut replacement = change.clone();
                    if let Some(id) = existing.get("_id").cloned() {
                        replacement.insert("_id".to_string(), id);
                    }
                    *existing = replacement;
                    Ok(())
                }
                None => Err(StoreError::NotFound),
            }
        })
    }

    fn count(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
    ) -> Result<u64, StoreError> {
        Ok(self.read(database, collection, |documents| {
            documents.iter().filter(|doc| filters::matches(doc, filter)).count() as u64
        }))
    }

    fn remove_all(
        &mut self,
        database: &str,
        collection: &str,
        filter: &Document,
    ) -> Result<u64, StoreError> {
        Ok(self.write(database, collection, |documents| {
            let before = documents.len();
            documents.retain(|doc| !filters::matches(doc, filter));
            (before - documents.len()) as u64
        }))
    }
}
