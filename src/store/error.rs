//! Store error types
//!
//! Defines all errors that can occur in the persistence layer.

use thiserror::Error;

/// Errors that can occur in the user/profile store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed (creating the data directory, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite returned an error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization of a stored column failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A user with this email already exists
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// A stored value could not be mapped back to a domain type
    #[error("Corrupt record: {0}")]
    Corruption(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::DuplicateEmail("a@b.c".to_string());
        assert_eq!(err.to_string(), "Email already registered: a@b.c");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let store_err: StoreError = json_err.into();
        assert!(matches!(store_err, StoreError::Serialization(_)));
    }
}
