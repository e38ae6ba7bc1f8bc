//! Structured JSON logger
//!
//! - One log line = one event
//! - Synchronous, no buffering
//! - `event` key first, then `severity` and `ts`, remaining fields sorted
//! - INFO/WARN to stdout, ERROR/FATAL to stderr

use std::fmt;
use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};

/// Log severity levels emitted by the access layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info,
    /// Degraded but recoverable (sort fallback, skipped record)
    Warn,
    /// Operation failure, absorbed per policy
    Error,
    /// Unrecoverable, process exits
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields.
    ///
    /// Fields after the fixed head keys appear in sorted order, so two
    /// calls with the same fields produce the same line shape.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::format_line(severity, event, fields, true);
        if severity >= Severity::Error {
            let mut err = io::stderr();
            let _ = err.write_all(line.as_bytes());
            let _ = err.flush();
        } else {
            let mut out = io::stdout();
            let _ = out.write_all(line.as_bytes());
            let _ = out.flush();
        }
    }

    /// Builds one JSON log line, newline-terminated.
    fn format_line(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        with_timestamp: bool,
    ) -> String {
        let mut line = String::with_capacity(128);
        line.push('{');
        line.push_str("\"event\":");
        line.push_str(&Self::quote(event));
        line.push_str(",\"severity\":");
        line.push_str(&Self::quote(severity.as_str()));
        if with_timestamp {
            let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            line.push_str(",\"ts\":");
            line.push_str(&Self::quote(&ts));
        }

        let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);
        for (key, value) in sorted {
            line.push(',');
            line.push_str(&Self::quote(key));
            line.push(':');
            line.push_str(&Self::quote(value));
        }

        line.push('}');
        line.push('\n');
        line
    }

    /// JSON-quotes a string, delegating escaping to serde_json.
    fn quote(s: &str) -> String {
        // Serializing a &str cannot fail; the fallback is never taken.
        serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Fatal, event, fields);
    }
}
