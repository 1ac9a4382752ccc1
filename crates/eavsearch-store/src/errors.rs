//! Error handling for eavsearch-store
//!
//! Maps driver, YAML and filesystem failures onto `SearchError`

use eavsearch_core::errors::SearchError;

/// Result type alias using SearchError
pub type Result<T> = std::result::Result<T, SearchError>;

/// Create a connection error from sqlx::Error
pub fn connection_error(err: sqlx::Error) -> SearchError {
    SearchError::Connection {
        message: err.to_string(),
    }
}

/// Create a query error from sqlx::Error
pub fn query_error(err: sqlx::Error) -> SearchError {
    SearchError::Query {
        message: err.to_string(),
    }
}

/// Create a serialization error from serde_yaml::Error
pub fn yaml_error(err: serde_yaml::Error) -> SearchError {
    SearchError::Serialization {
        message: err.to_string(),
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> SearchError {
    SearchError::io(operation, err)
}

/// Create an error for a runtime that could not be started
pub fn runtime_error(err: std::io::Error) -> SearchError {
    SearchError::Internal {
        message: format!("failed to start database runtime: {}", err),
    }
}
