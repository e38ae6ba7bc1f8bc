//! Multi-key document sorting for the in-memory backend
//!
//! Stable sort over JSON scalar values with type-ranked cross-type
//! ordering (missing < null < bool < number < string). Composite values
//! (arrays, objects) under a sort key cannot be ordered and make the
//! whole sort an unsupported-sort error, as does an empty key name; the
//! record store owns the unsorted fallback.

use std::cmp::Ordering;

use serde_json::Value;

use crate::connection::{Document, SortDirection, SortKey};
use crate::store::StoreError;

/// Sorts documents in place by the given keys, first key outermost.
pub fn sort(documents: &mut [Document], keys: &[SortKey]) -> Result<(), StoreError> {
    for key in keys {
        if key.field.is_empty() {
            return Err(StoreError::UnsupportedSort("empty sort key".to_string()));
        }
    }
    for document in documents.iter() {
        for key in keys {
            if let Some(Value::Array(_)) | Some(Value::Object(_)) = document.get(&key.field) {
                return Err(StoreError::UnsupportedSort(format!(
                    "composite value under sort key '{}'",
                    key.field
                )));
            }
        }
    }

    documents.sort_by(|a, b| {
        for key in keys {
            let ordering = compare_values(a.get(&key.field), b.get(&key.field));
            let ordering = match key.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    Ok(())
}

/// Type-ranked scalar comparison.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let rank = |v: Option<&Value>| -> u8 {
        match v {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            // Pre-rejected; ranked for completeness.
            Some(Value::Array(_)) | Some(Value::Object(_)) => 5,
        }
    };

    match rank(a).cmp(&rank(b)) {
        Ordering::Equal => match (a, b) {
            (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
            (Some(Value::Number(x)), Some(Value::Number(y))) => {
                let xf = x.as_f64().unwrap_or(0.0);
                let yf = y.as_f64().unwrap_or(0.0);
                xf.partial_cmp(&yf).unwrap_or(Ordering::Equal)
            }
            (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
            _ => Ordering::Equal,
        },
        unequal => unequal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn names(documents: &[Document]) -> Vec<&str> {
        documents
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_single_key_ascending() {
        let mut docs = vec![
            doc(json!({"name": "c", "rank": 3})),
            doc(json!({"name": "a", "rank": 1})),
            doc(json!({"name": "b", "rank": 2})),
        ];
        sort(&mut docs, &[SortKey::asc("rank")]).unwrap();
        assert_eq!(names(&docs), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_key_descending() {
        let mut docs = vec![
            doc(json!({"name": "a", "rank": 1})),
            doc(json!({"name": "c", "rank": 3})),
            doc(json!({"name": "b", "rank": 2})),
        ];
        sort(&mut docs, &[SortKey::desc("rank")]).unwrap();
        assert_eq!(names(&docs), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_multi_key_tie_break() {
        let mut docs = vec![
            doc(json!({"name": "b", "type": "x", "rank": 2})),
            doc(json!({"name": "a", "type": "x", "rank": 1})),
            doc(json!({"name": "c", "type": "w", "rank": 9})),
        ];
        sort(&mut docs, &[SortKey::asc("type"), SortKey::asc("rank")]).unwrap();
        assert_eq!(names(&docs), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_stable_on_equal_keys() {
        let mut docs = vec![
            doc(json!({"name": "first", "rank": 1})),
            doc(json!({"name": "second", "rank": 1})),
        ];
        sort(&mut docs, &[SortKey::asc("rank")]).unwrap();
        assert_eq!(names(&docs), vec!["first", "second"]);
    }

    #[test]
    fn test_missing_field_sorts_first() {
        let mut docs = vec![
            doc(json!({"name": "b", "rank": 1})),
            doc(json!({"name": "a"})),
        ];
        sort(&mut docs, &[SortKey::asc("rank")]).unwrap();
        assert_eq!(names(&docs), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_key_is_unsupported() {
        let mut docs = vec![doc(json!({"name": "a"}))];
        let err = sort(&mut docs, &[SortKey::asc("")]).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedSort(_)));
    }

    #[test]
    fn test_composite_value_is_unsupported() {
        let mut docs = vec![
            doc(json!({"name": "a", "meta": {"acc": 0.9}})),
            doc(json!({"name": "b", "meta": {"acc": 0.8}})),
        ];
        let err = sort(&mut docs, &[SortKey::asc("meta")]).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedSort(_)));
    }

    #[test]
    fn test_no_keys_keeps_natural_order() {
        let mut docs = vec![
            doc(json!({"name": "z"})),
            doc(json!({"name": "a"})),
        ];
        sort(&mut docs, &[]).unwrap();
        assert_eq!(names(&docs), vec!["z", "a"]);
    }
}
