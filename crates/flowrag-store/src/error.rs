//! Store error types.

use thiserror::Error;

use crate::record::WorkflowId;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by workflow persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No workflow exists under the given id.
    #[error("workflow not found: {0}")]
    NotFound(WorkflowId),

    /// The durable tier failed.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
