//! In-process vector index backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{VectorError, VectorResult};
use crate::store::{SearchResult, VectorIndexBackend, VectorRecord};

/// In-memory vector index with cosine similarity scoring.
///
/// Records are keyed by id; upserting an existing id replaces the
/// previous record. Vectors are compared against the dimension of the
/// first record inserted.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    records: RwLock<HashMap<String, VectorRecord>>,
}

impl MemoryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndexBackend for MemoryIndex {
    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<()> {
        let mut guard = self.records.write().await;

        let mut expected = guard.values().map(|r| r.vector.len()).next();
        for record in &records {
            match expected {
                Some(dim) if record.vector.len() != dim => {
                    return Err(VectorError::dimension_mismatch(dim, record.vector.len()));
                }
                None => expected = Some(record.vector.len()),
                _ => {}
            }
        }

        for record in records {
            guard.insert(record.id.clone(), record);
        }
        Ok(())
    }

    async fn search(&self, query: &[f32], limit: usize) -> VectorResult<Vec<SearchResult>> {
        let guard = self.records.read().await;

        if let Some(expected) = guard.values().map(|r| r.vector.len()).next() {
            if query.len() != expected {
                return Err(VectorError::dimension_mismatch(expected, query.len()));
            }
        }

        let mut hits: Vec<SearchResult> = guard
            .values()
            .map(|record| SearchResult {
                text: record.text.clone(),
                score: cosine_similarity(query, &record.vector),
                metadata: record.metadata.clone(),
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn delete(&self, ids: Vec<String>) -> VectorResult<()> {
        let mut guard = self.records.write().await;
        for id in ids {
            guard.remove(&id);
        }
        Ok(())
    }

    async fn len(&self) -> VectorResult<usize> {
        Ok(self.records.read().await.len())
    }
}
