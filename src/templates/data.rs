//! Template data context

use serde_json::{Map, Value};

/// Open string-to-value context handed to the template engine.
///
/// Keys are free-form; the typed accessors mirror how page handlers
/// consume the context (everything renders as text in the end).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateData(Map<String, Value>);

impl TemplateData {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Sets one entry, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value under `key` rendered as text; empty if absent.
    pub fn string(&self, key: &str) -> String {
        self.0.get(key).map(render_value).unwrap_or_default()
    }

    /// The value under `key` as an integer; 0 if absent or not a number.
    pub fn int(&self, key: &str) -> i64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// The conventional `Error` entry, empty when the page has none.
    pub fn error(&self) -> String {
        self.string("Error")
    }
}

impl From<Map<String, Value>> for TemplateData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Renders a JSON value as display text: strings bare, everything else
/// in its JSON form.
pub(super) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_accessor() {
        let data = TemplateData::new()
            .with("title", json!("Models"))
            .with("count", json!(3));
        assert_eq!(data.string("title"), "Models");
        assert_eq!(data.string("count"), "3");
        assert_eq!(data.string("absent"), "");
    }

    #[test]
    fn test_int_accessor() {
        let data = TemplateData::new()
            .with("count", json!(3))
            .with("parsed", json!("42"))
            .with("junk", json!("not a number"));
        assert_eq!(data.int("count"), 3);
        assert_eq!(data.int("parsed"), 42);
        assert_eq!(data.int("junk"), 0);
        assert_eq!(data.int("absent"), 0);
    }

    #[test]
    fn test_error_accessor() {
        let data = TemplateData::new().with("Error", json!("store unreachable"));
        assert_eq!(data.error(), "store unreachable");
        assert_eq!(TemplateData::new().error(), "");
    }
}
