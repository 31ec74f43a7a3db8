//! Error types for the parsing core.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the parsing core.
///
/// The comment scanner and the selector classifier are total; only the
/// selector grammar can reject its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Selector parsing error.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}
