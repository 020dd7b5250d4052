//! Structured JSON logger for txledger
//!
//! Each event is one JSON line on stderr: `event`, then `severity`, then
//! the caller's fields sorted by key. Stdout is left to command output.
//!
//! `TXLEDGER_LOG` sets the lowest severity that is written (trace, info,
//! warn, error). Unset or unrecognised values mean info. The variable is
//! read once per process.

use std::io::{self, Write};
use std::sync::OnceLock;

use serde_json::Value;

/// Environment variable holding the log threshold
pub const LOG_LEVEL_VAR: &str = "TXLEDGER_LOG";

/// Log severity levels, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Name written in the `severity` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Parses a level name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Severity::Trace),
            "info" => Some(Severity::Info),
            "warn" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    /// Resolves the threshold from a raw `TXLEDGER_LOG` value
    pub fn threshold(raw: Option<&str>) -> Self {
        raw.and_then(Severity::parse).unwrap_or(Severity::Info)
    }
}

static THRESHOLD: OnceLock<Severity> = OnceLock::new();

fn threshold() -> Severity {
    *THRESHOLD.get_or_init(|| Severity::threshold(std::env::var(LOG_LEVEL_VAR).ok().as_deref()))
}

/// Writes structured events to stderr
pub struct Logger;

impl Logger {
    /// Logs an event if `severity` meets the process threshold
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let stderr = io::stderr();
        Self::emit(threshold(), severity, event, fields, &mut stderr.lock());
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    /// Writes one line to `out` unless `severity` is below `threshold`.
    /// Returns whether a line was written. Write failures are dropped:
    /// logging never fails the operation it reports on.
    fn emit<W: Write>(
        threshold: Severity,
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        out: &mut W,
    ) -> bool {
        if severity < threshold {
            return false;
        }
        let line = Self::line(severity, event, fields);
        out.write_all(line.as_bytes()).and_then(|_| out.flush()).is_ok()
    }

    fn line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut sorted = fields.to_vec();
        sorted.sort_by_key(|&(key, _)| key);

        let members: Vec<String> = [("event", event), ("severity", severity.as_str())]
            .into_iter()
            .chain(sorted)
            .map(|(key, value)| format!("{}:{}", json_string(key), json_string(value)))
            .collect();

        format!("{{{}}}\n", members.join(","))
    }
}

fn json_string(s: &str) -> String {
    Value::from(s).to_string()
}
