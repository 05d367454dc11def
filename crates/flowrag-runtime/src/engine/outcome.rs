//! Execution result types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata of a retrieved chunk, carried as provenance.
pub type SourceMetadata = HashMap<String, serde_json::Value>;

/// Result of one workflow run.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The generated answer.
    pub answer: String,
    /// Provenance of the retrieved chunks, in descending similarity
    /// order; empty when no context was used.
    pub sources: Vec<SourceMetadata>,
    /// Whether the answer was conditioned on retrieved context.
    pub has_context: bool,
    /// Run metadata.
    pub metadata: RunMetadata,
}

/// Metadata describing how a result was produced.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RunMetadata {
    /// The query the run answered.
    pub query: String,
    /// Model selected on the llmEngine node, or `"default"`.
    pub model: String,
    /// Number of chunks that informed the answer.
    pub chunks_used: usize,
}
