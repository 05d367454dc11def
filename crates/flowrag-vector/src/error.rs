//! Vector index error types.

use thiserror::Error;

/// Result type for vector index operations.
pub type VectorResult<T> = Result<T, VectorError>;

/// Vector index errors.
#[derive(Debug, Error)]
pub enum VectorError {
    /// Connection to the index failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Query or record vector has the wrong dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl VectorError {
    /// Creates a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Creates a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Creates a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for VectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
