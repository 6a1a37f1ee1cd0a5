//! Diagnostics stream.
//!
//! Every problem found while loading and validating is recorded here as
//! `<file>:<line> <message>` and mirrored to `tracing` under the `aidl`
//! target. Only `Error` entries count toward the error tally.

use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    /// Context for a preceding error (e.g. "previously defined here").
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{} {}", self.file, line, self.message),
            None => write!(f, "{}: {}", self.file, self.message),
        }
    }
}

/// Append-only collection of diagnostics for one pipeline run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error at `file:line`.
    pub fn error(&mut self, file: impl Into<String>, line: u32, message: impl Into<String>) {
        self.push(Severity::Error, file.into(), Some(line), message.into());
    }

    /// Record an error that has no meaningful line (e.g. unreadable file).
    pub fn file_error(&mut self, file: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, file.into(), None, message.into());
    }

    /// Record a note attached to the previous error.
    pub fn note(&mut self, file: impl Into<String>, line: u32, message: impl Into<String>) {
        self.push(Severity::Note, file.into(), Some(line), message.into());
    }

    fn push(&mut self, severity: Severity, file: String, line: Option<u32>, message: String) {
        let diag = Diagnostic {
            severity,
            file,
            line,
            message,
        };
        match severity {
            Severity::Error => error!(target: "aidl", "{}", diag),
            Severity::Note => info!(target: "aidl", "{}", diag),
        }
        self.entries.push(diag);
    }

    /// Number of errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every entry, one per line, in the order recorded.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for d in &self.entries {
            out.push_str(&d.to_string());
            out.push('\n');
        }
        out
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
