//! Filter matching for the in-memory backend
//!
//! Field equality plus operator objects (`$eq`, `$ne`, `$gt`, `$gte`,
//! `$lt`, `$lte`, `$in`), AND semantics across fields. No type
//! coercion anywhere: numbers compare numerically, strings lexically,
//! and a cross-type range comparison never matches. This layer does not
//! validate filters: an unrecognized operator simply matches nothing.

use std::cmp::Ordering;

use serde_json::Value;

use crate::connection::Document;

/// Checks whether a document matches every field of the filter.
///
/// An empty filter matches every document.
pub fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, condition)| matches_condition(document.get(field), condition))
}

/// Whether a filter value is an operator object (`{"$gte": 3}`) rather
/// than a plain equality value.
pub fn is_operator_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty() && map.keys().all(|k| k.starts_with('$')),
        _ => false,
    }
}

fn matches_condition(actual: Option<&Value>, condition: &Value) -> bool {
    if let Value::Object(operators) = condition {
        if is_operator_object(condition) {
            return operators
                .iter()
                .all(|(op, bound)| apply_operator(actual, op, bound));
        }
    }
    // Plain equality; a missing field never matches.
    match actual {
        Some(value) => value == condition,
        None => false,
    }
}

fn apply_operator(actual: Option<&Value>, op: &str, bound: &Value) -> bool {
    match op {
        "$eq" => actual == Some(bound),
        "$ne" => actual != Some(bound),
        "$gt" => ordered(actual, bound).map_or(false, Ordering::is_gt),
        "$gte" => ordered(actual, bound).map_or(false, Ordering::is_ge),
        "$lt" => ordered(actual, bound).map_or(false, Ordering::is_lt),
        "$lte" => ordered(actual, bound).map_or(false, Ordering::is_le),
        "$in" => match (actual, bound) {
            (Some(value), Value::Array(candidates)) => candidates.contains(value),
            _ => false,
        },
        // Unrecognized operator: matches nothing.
        _ => false,
    }
}

/// Same-type scalar ordering: numbers numerically, strings lexically.
/// Anything else (missing, null, cross-type, composite) is unordered.
fn ordered(actual: Option<&Value>, bound: &Value) -> Option<Ordering> {
    match (actual?, bound) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(matches(&doc(json!({"name": "modelA"})), &Document::new()));
        assert!(matches(&Document::new(), &Document::new()));
    }

    #[test]
    fn test_field_equality() {
        let d = doc(json!({"name": "modelA", "type": "classifier"}));
        assert!(matches(&d, &doc(json!({"name": "modelA"}))));
        assert!(!matches(&d, &doc(json!({"name": "modelB"}))));
    }

    #[test]
    fn test_all_fields_must_match() {
        let d = doc(json!({"name": "modelA", "type": "classifier"}));
        assert!(matches(&d, &doc(json!({"name": "modelA", "type": "classifier"}))));
        assert!(!matches(&d, &doc(json!({"name": "modelA", "type": "ranker"}))));
    }

    #[test]
    fn test_missing_field_never_matches_equality() {
        let d = doc(json!({"name": "modelA"}));
        assert!(!matches(&d, &doc(json!({"owner": "alice"}))));
    }

    #[test]
    fn test_no_type_coercion() {
        let d = doc(json!({"rank": 3}));
        assert!(!matches(&d, &doc(json!({"rank": "3"}))));
        assert!(matches(&d, &doc(json!({"rank": 3}))));
    }

    #[test]
    fn test_range_operators() {
        let d = doc(json!({"rank": 5}));
        assert!(matches(&d, &doc(json!({"rank": {"$gt": 4}}))));
        assert!(matches(&d, &doc(json!({"rank": {"$gte": 5}}))));
        assert!(matches(&d, &doc(json!({"rank": {"$lt": 6}}))));
        assert!(!matches(&d, &doc(json!({"rank": {"$lte": 4}}))));
        assert!(matches(&d, &doc(json!({"rank": {"$gt": 4, "$lt": 6}}))));
    }

    #[test]
    fn test_cross_type_range_never_matches() {
        let d = doc(json!({"rank": "high"}));
        assert!(!matches(&d, &doc(json!({"rank": {"$gt": 4}}))));
    }

    #[test]
    fn test_ne_matches_missing_field() {
        let d = doc(json!({"name": "modelA"}));
        assert!(matches(&d, &doc(json!({"owner": {"$ne": "alice"}}))));
        assert!(!matches(&d, &doc(json!({"name": {"$ne": "modelA"}}))));
    }

    #[test]
    fn test_in_operator() {
        let d = doc(json!({"type": "classifier"}));
        assert!(matches(&d, &doc(json!({"type": {"$in": ["classifier", "ranker"]}}))));
        assert!(!matches(&d, &doc(json!({"type": {"$in": ["regressor"]}}))));
    }

    #[test]
    fn test_unknown_operator_matches_nothing() {
        let d = doc(json!({"name": "modelA"}));
        assert!(!matches(&d, &doc(json!({"name": {"$regex": "model.*"}}))));
    }

    #[test]
    fn test_operator_object_detection() {
        assert!(is_operator_object(&json!({"$gte": 1})));
        assert!(!is_operator_object(&json!({"nested": 1})));
        assert!(!is_operator_object(&json!({})));
        assert!(!is_operator_object(&json!("plain")));
    }
}
