// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Decoding problems are deliberately absent: malformed cache blobs
//! degrade to empty values and never surface here.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required argument was missing, empty, or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The identifier does not resolve to a live page in the cache.
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// The cache database could not be read.
    #[error("Storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Validation failures are the caller's fault and surface as invalid arguments.
impl From<crate::types::ValidationError> for AppError {
    fn from(err: crate::types::ValidationError) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl AppError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn page_not_found(id: impl Into<String>) -> Self {
        Self::PageNotFound(id.into())
    }

    /// Whether the caller supplied bad input (as opposed to the cache failing).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Whether the error means the requested object simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PageNotFound(_))
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_identifier() {
        let err = AppError::page_not_found("abcd1234");
        assert_eq!(err.to_string(), "page not found: abcd1234");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn invalid_argument_is_classified() {
        let err = AppError::invalid_argument("query must not be empty");
        assert_eq!(err.to_string(), "Invalid argument: query must not be empty");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn validation_errors_become_invalid_arguments() {
        let err: AppError = crate::types::ValidationError::EmptyField("page_id").into();
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: Empty required field: page_id");
    }
}
