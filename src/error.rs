//! Error types for the financial query engine
//!
//! The query pipeline itself is total and never fails. Errors only arise at
//! the edges: loading a dataset, reading configuration, serving requests.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, QueryEngineError>;

#[derive(Error, Debug)]
pub enum QueryEngineError {

    #[error("Dataset error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
