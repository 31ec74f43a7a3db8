//! Error types for the linter.

use std::path::PathBuf;

/// Result type alias for linter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop linting altogether.
///
/// Problems found in linted files are [`Diagnostic`](crate::Diagnostic)s,
/// not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A rule name that no rule answers to.
    #[error("Unknown rule '{0}'")]
    UnknownRule(String),

    /// Rule options that the rule rejects.
    #[error("Invalid options for rule '{rule}': {message}")]
    InvalidOption { rule: String, message: String },

    /// Directory traversal error.
    #[error("Failed to walk '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error.
    pub fn config(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Config {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid option error.
    pub fn invalid_option(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
