//! Error types for Corkboard.

use thiserror::Error;

/// Common error type for Corkboard.
#[derive(Error, Debug)]
pub enum CorkboardError {
    /// Key-value store error.
    ///
    /// Wraps failures from any store backend. Errors from sqlx and redis
    /// are converted automatically.
    #[error("store error: {0}")]
    Store(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] crate::template::TemplateError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for CorkboardError {
    fn from(e: sqlx::Error) -> Self {
        CorkboardError::Store(e.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CorkboardError {
    fn from(e: redis::RedisError) -> Self {
        CorkboardError::Store(e.to_string())
    }
}

/// Result type alias for Corkboard operations.
pub type Result<T> = std::result::Result<T, CorkboardError>;
