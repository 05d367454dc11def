//! Embedding provider seam.

use async_trait::async_trait;

use super::ProviderResult;

/// Produces embedding vectors for text.
///
/// Implementations must be deterministic for identical input; the
/// vector dimension is fixed by the provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single piece of text.
    async fn embed(&self, text: &str) -> ProviderResult<Vec<f32>>;

    /// Embeds a batch of texts, one vector per input.
    ///
    /// The default implementation embeds sequentially; batching
    /// providers should override it.
    async fn embed_batch(&self, texts: &[String]) -> ProviderResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}
