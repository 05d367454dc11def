//! Vector index trait and tracing wrapper.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET;
use crate::error::VectorResult;

/// A text chunk with its embedding, ready for indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The chunk text.
    pub text: String,
    /// The embedding vector.
    pub vector: Vec<f32>,
    /// Chunk metadata (source document, page, ...).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl VectorRecord {
    /// Creates a new record from a chunk and its embedding.
    pub fn new(id: impl Into<String>, text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            vector,
            metadata: HashMap::new(),
        }
    }

    /// Replaces the record metadata.
    pub fn with_metadata(
        mut self,
        metadata: impl IntoIterator<Item = (impl Into<String>, serde_json::Value)>,
    ) -> Self {
        self.metadata = metadata.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Adds a single metadata field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A retrieval hit from a similarity query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The chunk text.
    pub text: String,
    /// Similarity score, higher is more relevant.
    pub score: f32,
    /// Metadata carried over from the indexed record.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Trait for vector index backends.
#[async_trait]
pub trait VectorIndexBackend: Send + Sync {
    /// Inserts or replaces records by id.
    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<()>;

    /// Returns up to `limit` records most similar to `query`,
    /// ordered by descending score.
    async fn search(&self, query: &[f32], limit: usize) -> VectorResult<Vec<SearchResult>>;

    /// Deletes records by their ids.
    async fn delete(&self, ids: Vec<String>) -> VectorResult<()>;

    /// Returns the number of indexed records.
    async fn len(&self) -> VectorResult<usize>;
}

/// Cloneable vector index handle wrapping a backend implementation.
#[derive(Clone)]
pub struct VectorIndex {
    backend: Arc<dyn VectorIndexBackend>,
}

impl VectorIndex {
    /// Creates an index handle over the given backend.
    pub fn new(backend: Arc<dyn VectorIndexBackend>) -> Self {
        Self { backend }
    }

    /// Inserts or replaces records by id.
    pub async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            count = %records.len(),
            "Upserting records"
        );
        self.backend.upsert(records).await
    }

    /// Searches for the `limit` most similar records.
    pub async fn search(&self, query: &[f32], limit: usize) -> VectorResult<Vec<SearchResult>> {
        tracing::debug!(
            target: TRACING_TARGET,
            limit = %limit,
            "Searching index"
        );
        self.backend.search(query, limit).await
    }

    /// Deletes records by their ids.
    pub async fn delete(&self, ids: Vec<String>) -> VectorResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            count = %ids.len(),
            "Deleting records"
        );
        self.backend.delete(ids).await
    }

    /// Returns the number of indexed records.
    pub async fn len(&self) -> VectorResult<usize> {
        self.backend.len().await
    }

    /// Returns whether the index holds no records.
    pub async fn is_empty(&self) -> VectorResult<bool> {
        Ok(self.len().await? == 0)
    }
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex").finish_non_exhaustive()
    }
}
