//! Generation provider seam.

use async_trait::async_trait;

use super::ProviderResult;

/// Generates an answer to a question, optionally conditioned on
/// retrieved context.
///
/// With `context: None` the provider must answer from the question
/// alone. A provider either returns text or returns an error; there
/// is no silent canned-fallback path — a provider that degrades
/// internally and wants that visible must return `Err`.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates an answer.
    async fn generate(&self, question: &str, context: Option<&str>) -> ProviderResult<String>;
}
