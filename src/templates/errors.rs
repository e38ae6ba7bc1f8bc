//! Template error types
//!
//! The panicking render entry points treat all of these as
//! unrecoverable; the `try_` variants surface them to callers that can
//! recover.

use thiserror::Error;

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Failures raised while loading or rendering a template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template file could not be read
    #[error("template {name} could not be loaded: {reason}")]
    Load { name: String, reason: String },

    /// No embedded template with this name is bundled
    #[error("unknown embedded template {0}")]
    UnknownTemplate(String),

    /// The template text itself is broken
    #[error("template {name} is malformed: {reason}")]
    Malformed { name: String, reason: String },

    /// The template references a field absent from the data context
    #[error("template {name} references missing field {field}")]
    MissingField { name: String, field: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = TemplateError::MissingField {
            name: "models.tmpl".into(),
            field: "title".into(),
        };
        let display = format!("{}", err);
        assert!(display.contains("models.tmpl"));
        assert!(display.contains("title"));
    }
}
