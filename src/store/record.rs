//! The persisted Model record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::connection::Document;

use super::errors::StoreError;

/// A metadata record describing one machine-learning model.
///
/// `name` is the only field this layer treats as an identity key: it is
/// the upsert key, set by the caller. An empty name makes a record
/// ineligible for upsert (skipped, not stored) but not for insert.
/// `meta` is deliberately schema-less; callers store heterogeneous
/// metadata and this layer never inspects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Free-form metadata about the model
    #[serde(default)]
    pub meta: Map<String, Value>,

    /// Model name, the intended unique identifier
    #[serde(default)]
    pub name: String,

    /// Category label
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl Record {
    /// Creates a record with empty metadata.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            meta: Map::new(),
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Adds one metadata entry, builder-style.
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Pretty JSON representation, for display by higher layers.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Serializes into the document shape handed to the backend.
    pub fn to_document(&self) -> Result<Document, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Write(format!(
                "record did not serialize to a document: {}",
                other
            ))),
        }
    }

    /// Deserializes from a stored document.
    ///
    /// Lenient: store-managed fields (`_id`, `model`) and anything else
    /// unknown are ignored, missing fields default.
    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(Value::Object(document))?)
    }
}
