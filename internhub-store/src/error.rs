//! Error types for store and cache operations
//!
//! This module defines custom error types for the internhub-store library,
//! covering document store queries and cache (de)serialization.

use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Query execution error
    #[error("Query error: {0}")]
    QueryError(String),

    /// Invalid filter or pattern supplied by the caller
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError::Other(s)
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = StoreError::NotFound("user 42".to_string());
        assert_eq!(error.to_string(), "Not found: user 42");

        let error = StoreError::InvalidPattern("(unclosed".to_string());
        assert!(error.to_string().contains("unclosed"));
    }

    #[test]
    fn test_error_conversion() {
        let error: StoreError = "test error".into();
        assert!(matches!(error, StoreError::Other(_)));

        let error: StoreError = "test error".to_string().into();
        assert!(matches!(error, StoreError::Other(_)));
    }
}
