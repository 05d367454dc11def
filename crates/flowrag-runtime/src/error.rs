//! Engine error types.

use thiserror::Error;

use crate::graph::NodeKind;
use crate::provider::ProviderError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by workflow execution.
///
/// Validation problems are not errors; they are reported through
/// [`crate::validate::ValidationReport`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// A node kind required by the pipeline is absent.
    ///
    /// This is an execution-time contract violation: it cannot occur
    /// for a workflow that passed validation.
    #[error("workflow has no {0} node")]
    MissingNode(NodeKind),

    /// The generation collaborator failed. Fatal, unlike retrieval.
    #[error("generation failed: {0}")]
    Generation(#[source] ProviderError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Why the retrieval stage produced no context.
///
/// Recovered inside the engine and never surfaced to callers; the
/// only externally visible trace is `has_context: false` on the
/// execution result.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The embedding collaborator failed.
    #[error("embedding failed: {0}")]
    Embedding(#[source] ProviderError),

    /// The similarity search failed.
    #[error("search failed: {0}")]
    Search(#[source] flowrag_vector::VectorError),
}
