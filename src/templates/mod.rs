//! Template rendering collaborator
//!
//! Consumed by higher layers to turn store data into HTML: render a
//! named template file from a directory, or a named template from the
//! embedded asset set. Malformed templates and missing fields abort
//! the caller; the `try_` variants exist for callers that can recover.
//!
//! Whether a render-once-per-instance cache is right for a given page
//! depends on whether its data can vary: both behaviors are available
//! via [`CachePolicy`], and render-once is the default.

mod data;
mod engine;
mod errors;

pub use data::TemplateData;
pub use engine::{CachePolicy, TemplateEngine};
pub use errors::{TemplateError, TemplateResult};
