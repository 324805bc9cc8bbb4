//! Error types for sqlscope

use thiserror::Error;

/// Core error type for sqlscope operations
#[derive(Error, Debug)]
pub enum SqlscopeError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SqlscopeError {
    /// Returns true for errors that mark a single bad log entry rather than
    /// a failure of the whole session.
    pub fn is_record_local(&self) -> bool {
        matches!(self, Self::MalformedRecord(_))
    }
}

/// Result type alias for sqlscope operations
pub type Result<T> = std::result::Result<T, SqlscopeError>;
