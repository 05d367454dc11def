//! Collaborator traits for embedding and text generation.
//!
//! Real providers (hosted embedding models, LLM APIs) live outside
//! this crate; the engine only sees these seams.

mod embedding;
mod generation;

use thiserror::Error;

pub use embedding::EmbeddingProvider;
pub use generation::GenerationProvider;

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by embedding or generation providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider could not be reached or is not configured.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other provider-side failure.
    #[error("provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Creates an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Creates an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Creates a generic provider error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
