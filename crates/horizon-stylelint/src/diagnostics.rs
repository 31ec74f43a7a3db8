//! Diagnostics reported by rules.

use std::fmt;

use serde::Serialize;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A location in a linted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// File path as given to the linter.
    pub file: String,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column, in characters.
    pub column: u32,
    /// Byte offset into the file.
    pub offset: usize,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32, offset: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            offset,
        }
    }
}

/// A problem found by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Rule name (e.g., "scss/dollar-variable-default").
    pub rule: String,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// Location in source.
    pub location: Location,
}

impl Diagnostic {
    pub fn new(
        rule: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        location: Location,
    ) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            severity,
            location,
        }
    }

    /// Create an error diagnostic.
    pub fn error(rule: impl Into<String>, message: impl Into<String>, location: Location) -> Self {
        Self::new(rule, message, Severity::Error, location)
    }

    /// Create a warning diagnostic.
    pub fn warning(rule: impl Into<String>, message: impl Into<String>, location: Location) -> Self {
        Self::new(rule, message, Severity::Warning, location)
    }

    /// Whether this diagnostic should fail the run.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {} ({})",
            self.location.file,
            self.location.line,
            self.location.column,
            self.severity,
            self.message,
            self.rule
        )
    }
}
