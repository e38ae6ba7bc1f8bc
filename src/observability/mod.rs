//! Observability for the access layer
//!
//! Structured JSON logging only: one log line = one event, synchronous,
//! no buffering. The logs are the sink for every absorbed per-operation
//! failure; callers that need more than the default lenient behavior read
//! the diagnostic attached to the operation outcome instead of the logs.

mod logger;

pub use logger::{Logger, Severity};
