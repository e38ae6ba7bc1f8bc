//! Template engine
//!
//! Renders `{{field}}` placeholders against a data context, either from
//! a template file in a caller-supplied directory or from the embedded
//! asset set bundled into the binary.
//!
//! The rendered output is cached per engine instance after the first
//! render when the policy is [`CachePolicy::FirstRender`]: subsequent
//! calls return the same cached string regardless of new input. That
//! suits pages rendered once from static data; engines rendering fresh
//! data per call must use [`CachePolicy::Bypass`].

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use super::data::{render_value, TemplateData};
use super::errors::{TemplateError, TemplateResult};

/// Embedded template asset set.
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    ("models.tmpl", include_str!("../../assets/templates/models.tmpl")),
    ("error.tmpl", include_str!("../../assets/templates/error.tmpl")),
];

/// Caching behavior of one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Cache the first rendered string forever; later calls return it
    /// unchanged, ignoring new input. The default: treat each engine
    /// instance as one-shot.
    #[default]
    FirstRender,
    /// Re-render on every call.
    Bypass,
}

/// Renders named templates with a per-instance output cache.
pub struct TemplateEngine {
    policy: CachePolicy,
    cached: Mutex<Option<String>>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(CachePolicy::FirstRender)
    }
}

impl TemplateEngine {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            cached: Mutex::new(None),
        }
    }

    /// Renders the named template file from the given directory.
    ///
    /// # Panics
    ///
    /// On a missing or malformed template, or a placeholder referencing
    /// a field absent from `data`. Rendering failures are unrecoverable
    /// for page handlers; use [`try_render_file`](Self::try_render_file)
    /// to recover instead.
    pub fn render_file(&self, dir: &Path, name: &str, data: &TemplateData) -> String {
        match self.try_render_file(dir, name, data) {
            Ok(html) => html,
            Err(err) => panic!("template rendering failed: {}", err),
        }
    }

    /// Non-panicking variant of [`render_file`](Self::render_file).
    pub fn try_render_file(
        &self,
        dir: &Path,
        name: &str,
        data: &TemplateData,
    ) -> TemplateResult<String> {
        self.cached_or(|| {
            let path = dir.join(name);
            let text = std::fs::read_to_string(&path).map_err(|err| TemplateError::Load {
                name: name.to_string(),
                reason: err.to_string(),
            })?;
            render_text(name, &text, data)
        })
    }

    /// Renders a named template from the embedded asset set.
    ///
    /// # Panics
    ///
    /// On an unknown or malformed template, or a missing field.
    pub fn render_embedded(&self, name: &str, data: &TemplateData) -> String {
        match self.try_render_embedded(name, data) {
            Ok(html) => html,
            Err(err) => panic!("template rendering failed: {}", err),
        }
    }

    /// Non-panicking variant of [`render_embedded`](Self::render_embedded).
    pub fn try_render_embedded(&self, name: &str, data: &TemplateData) -> TemplateResult<String> {
        self.cached_or(|| {
            let text = EMBEDDED_TEMPLATES
                .iter()
                .find(|(entry, _)| *entry == name)
                .map(|(_, text)| *text)
                .ok_or_else(|| TemplateError::UnknownTemplate(name.to_string()))?;
            render_text(name, text, data)
        })
    }

    fn cached_or(
        &self,
        render: impl FnOnce() -> TemplateResult<String>,
    ) -> TemplateResult<String> {
        if self.policy == CachePolicy::Bypass {
            return render();
        }
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(html) = cached.as_ref() {
            return Ok(html.clone());
        }
        let html = render()?;
        *cached = Some(html.clone());
        Ok(html)
    }
}

/// Substitutes `{{field}}` placeholders in the template text.
fn render_text(name: &str, template: &str, data: &TemplateData) -> TemplateResult<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| TemplateError::Malformed {
            name: name.to_string(),
            reason: "unclosed placeholder".to_string(),
        })?;
        let field = after[..end].trim();
        if field.is_empty() {
            return Err(TemplateError::Malformed {
                name: name.to_string(),
                reason: "empty placeholder".to_string(),
            });
        }
        let value = data.get(field).ok_or_else(|| TemplateError::MissingField {
            name: name.to_string(),
            field: field.to_string(),
        })?;
        rendered.push_str(&render_value(value));
        rest = &after[end + 2..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> TemplateData {
        TemplateData::new()
            .with("title", json!("Models"))
            .with("count", json!(3))
    }

    #[test]
    fn test_placeholder_substitution() {
        let html = render_text("t", "<h1>{{title}}</h1><p>{{count}} models</p>", &data()).unwrap();
        assert_eq!(html, "<h1>Models</h1><p>3 models</p>");
    }

    #[test]
    fn test_whitespace_in_placeholder() {
        let html = render_text("t", "{{ title }}", &data()).unwrap();
        assert_eq!(html, "Models");
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let err = render_text("t", "{{absent}}", &data()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingField { .. }));
    }

    #[test]
    fn test_unclosed_placeholder_is_malformed() {
        let err = render_text("t", "<h1>{{title", &data()).unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { .. }));
    }

    #[test]
    fn test_plain_text_passes_through() {
        let html = render_text("t", "no placeholders here", &data()).unwrap();
        assert_eq!(html, "no placeholders here");
    }

    #[test]
    #[should_panic(expected = "template rendering failed")]
    fn test_render_embedded_panics_on_unknown_template() {
        let engine = TemplateEngine::default();
        let _ = engine.render_embedded("nope.tmpl", &data());
    }

    #[test]
    fn test_embedded_asset_set() {
        let engine = TemplateEngine::default();
        let context = TemplateData::new()
            .with("title", json!("Models"))
            .with("count", json!(2))
            .with("records", json!("<li>modelA</li>"));
        let html = engine.render_embedded("models.tmpl", &context);
        assert!(html.contains("Models"));
        assert!(html.contains("<li>modelA</li>"));
    }

    #[test]
    fn test_first_render_policy_ignores_new_input() {
        let engine = TemplateEngine::new(CachePolicy::FirstRender);
        let first = engine
            .try_render_embedded("error.tmpl", &TemplateData::new()
                .with("title", json!("Error"))
                .with("error", json!("boom")))
            .unwrap();
        let second = engine
            .try_render_embedded("error.tmpl", &TemplateData::new()
                .with("title", json!("Error"))
                .with("error", json!("different")))
            .unwrap();
        assert_eq!(first, second, "cached output must win over new input");
    }

    #[test]
    fn test_bypass_policy_rerenders() {
        let engine = TemplateEngine::new(CachePolicy::Bypass);
        let first = engine
            .try_render_embedded("error.tmpl", &TemplateData::new()
                .with("title", json!("Error"))
                .with("error", json!("boom")))
            .unwrap();
        let second = engine
            .try_render_embedded("error.tmpl", &TemplateData::new()
                .with("title", json!("Error"))
                .with("error", json!("different")))
            .unwrap();
        assert_ne!(first, second);
        assert!(second.contains("different"));
    }
}
