//! Error types for SheetDB.
//!
//! Every fallible operation in the workspace reports a [`SheetdbError`]. The
//! HTTP layer turns these into JSON bodies using [`SheetdbError::status_code`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SheetDB.
#[derive(Debug, Error)]
pub enum SheetdbError {
    // Catalog errors
    #[error("Database registry not initialized")]
    NotReady,

    #[error("Database not found: {name}")]
    DatasetNotFound { name: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    // Filter formatting errors
    #[error("Unsupported filter operator: {operator}")]
    UnsupportedOperator { operator: String },

    #[error("Filter rule on {field} has no value")]
    MissingValue { field: String },

    // Database errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Remote API errors (client side)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for SheetDB operations.
pub type Result<T> = std::result::Result<T, SheetdbError>;

impl From<std::io::Error> for SheetdbError {
    fn from(err: std::io::Error) -> Self {
        SheetdbError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for SheetdbError {
    fn from(err: serde_json::Error) -> Self {
        SheetdbError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for SheetdbError {
    fn from(err: rusqlite::Error) -> Self {
        SheetdbError::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl SheetdbError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        SheetdbError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// HTTP status code used when this error reaches a client.
    ///
    /// - 503: the catalog has not been published yet
    /// - 404: unknown dataset
    /// - 400: malformed request or filter tree
    /// - 502: upstream API failure seen by the client
    /// - 500: everything else
    pub fn status_code(&self) -> u16 {
        match self {
            SheetdbError::NotReady => 503,
            SheetdbError::DatasetNotFound { .. } => 404,
            SheetdbError::InvalidRequest { .. }
            | SheetdbError::UnsupportedOperator { .. }
            | SheetdbError::MissingValue { .. } => 400,
            SheetdbError::Api { status, .. } => *status,
            SheetdbError::Network { .. } => 502,
            _ => 500,
        }
    }

    /// Whether this error means "try again later" rather than "this failed".
    pub fn is_not_ready(&self) -> bool {
        matches!(self, SheetdbError::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SheetdbError::DatasetNotFound {
            name: "census".into(),
        };
        assert_eq!(err.to_string(), "Database not found: census");
        assert_eq!(
            SheetdbError::NotReady.to_string(),
            "Database registry not initialized"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(SheetdbError::NotReady.status_code(), 503);
        assert_eq!(
            SheetdbError::DatasetNotFound { name: "x".into() }.status_code(),
            404
        );
        assert_eq!(
            SheetdbError::UnsupportedOperator {
                operator: "between".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            SheetdbError::InvalidRequest {
                message: "duplicate field".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            SheetdbError::Config {
                message: "bad".into()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_not_ready_is_distinct() {
        assert!(SheetdbError::NotReady.is_not_ready());
        assert!(!SheetdbError::DatasetNotFound { name: "x".into() }.is_not_ready());
    }
}
