//! Workflow executor.

use std::sync::Arc;

use flowrag_vector::{SearchResult, VectorIndex};
use tokio::sync::Semaphore;

use super::config::EngineConfig;
use super::outcome::{ExecutionResult, RunMetadata, SourceMetadata};
use crate::error::{EngineError, EngineResult, RetrievalError};
use crate::graph::{NodeKind, WorkflowDefinition};
use crate::provider::{EmbeddingProvider, GenerationProvider};
use crate::validate::ValidationReport;

/// Tracing target for executor operations.
const TRACING_TARGET: &str = "flowrag_runtime::engine";

/// The workflow execution engine.
///
/// Drives a validated workflow through the fixed pipeline
/// `userQuery → (knowledgeBase) → llmEngine → output`. Collaborators
/// are injected once at construction; runs are independent and may
/// proceed concurrently up to `max_concurrent_runs`.
pub struct Engine {
    config: EngineConfig,
    embedding: Arc<dyn EmbeddingProvider>,
    index: VectorIndex,
    generation: Arc<dyn GenerationProvider>,
    semaphore: Arc<Semaphore>,
}

impl Engine {
    /// Creates an engine with the given collaborators.
    pub fn new(
        config: EngineConfig,
        embedding: Arc<dyn EmbeddingProvider>,
        index: VectorIndex,
        generation: Arc<dyn GenerationProvider>,
    ) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_runs));

        tracing::info!(
            target: TRACING_TARGET,
            top_k = config.top_k,
            max_concurrent_runs = config.max_concurrent_runs,
            "Workflow engine initialized"
        );

        Self {
            config,
            embedding,
            index,
            generation,
            semaphore,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the number of available run slots.
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Validates a workflow definition.
    ///
    /// Convenience for callers that gate execution on validity; `run`
    /// itself only re-derives the required nodes.
    pub fn validate(&self, definition: &WorkflowDefinition) -> ValidationReport {
        definition.validate()
    }

    /// Executes a workflow against a query.
    ///
    /// The definition must already have passed validation; the engine
    /// re-derives the required nodes by kind as a defensive
    /// precondition check rather than re-running full validation.
    /// Retrieval failure degrades to context-less generation;
    /// generation failure is fatal.
    pub async fn run(
        &self,
        query: &str,
        definition: &WorkflowDefinition,
    ) -> EngineResult<ExecutionResult> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| EngineError::Internal(format!("semaphore closed: {e}")))?;

        tracing::debug!(
            target: TRACING_TARGET,
            node_count = definition.node_count(),
            edge_count = definition.edge_count(),
            "Starting workflow run"
        );

        // Locate the pipeline nodes by kind.
        definition
            .find_node(NodeKind::UserQuery)
            .ok_or(EngineError::MissingNode(NodeKind::UserQuery))?;
        let knowledge_base = definition.find_node(NodeKind::KnowledgeBase);
        let llm = definition
            .find_node(NodeKind::LlmEngine)
            .ok_or(EngineError::MissingNode(NodeKind::LlmEngine))?;
        definition
            .find_node(NodeKind::Output)
            .ok_or(EngineError::MissingNode(NodeKind::Output))?;

        // Retrieve context, if the workflow has a knowledge base.
        let mut context: Option<String> = None;
        let mut sources: Vec<SourceMetadata> = Vec::new();

        if let Some(node) = knowledge_base {
            match self.retrieve(query).await {
                Ok(hits) if !hits.is_empty() => {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        node_id = %node.id,
                        chunks = hits.len(),
                        "Retrieved context chunks"
                    );
                    context = Some(
                        hits.iter()
                            .map(|hit| hit.text.as_str())
                            .collect::<Vec<_>>()
                            .join("\n\n"),
                    );
                    sources = hits.into_iter().map(|hit| hit.metadata).collect();
                }
                Ok(_) => {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        node_id = %node.id,
                        "Retrieval returned no chunks; generating without context"
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        node_id = %node.id,
                        %error,
                        "Retrieval failed; generating without context"
                    );
                }
            }
        }

        // Generate the answer. Unlike retrieval, a failure here is fatal.
        let llm_config = llm.config.as_llm_engine();
        let model = llm_config
            .and_then(|c| c.model.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "default".to_owned());

        let answer = self
            .generation
            .generate(query, context.as_deref())
            .await
            .map_err(EngineError::Generation)?;

        tracing::debug!(
            target: TRACING_TARGET,
            %model,
            has_context = context.is_some(),
            chunks_used = sources.len(),
            "Workflow run completed"
        );

        Ok(ExecutionResult {
            answer,
            has_context: context.is_some(),
            metadata: RunMetadata {
                query: query.to_owned(),
                model,
                chunks_used: sources.len(),
            },
            sources,
        })
    }

    /// Embeds the query and searches the vector index.
    async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, RetrievalError> {
        let embedding = self
            .embedding
            .embed(query)
            .await
            .map_err(RetrievalError::Embedding)?;
        self.index
            .search(&embedding, self.config.top_k)
            .await
            .map_err(RetrievalError::Search)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("available_slots", &self.available_slots())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use flowrag_vector::{MemoryIndex, VectorRecord};
    use tokio::sync::Mutex;

    use super::*;
    use crate::graph::{Edge, KnowledgeBaseConfig, LlmConfig, Node, OutputConfig, QueryConfig};
    use crate::provider::{ProviderError, ProviderResult};

    struct AxisEmbedding;

    #[async_trait]
    impl EmbeddingProvider for AxisEmbedding {
        async fn embed(&self, _text: &str) -> ProviderResult<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }
    }

    struct BrokenEmbedding;

    #[async_trait]
    impl EmbeddingProvider for BrokenEmbedding {
        async fn embed(&self, _text: &str) -> ProviderResult<Vec<f32>> {
            Err(ProviderError::unavailable("embedding backend offline"))
        }
    }

    /// Records every (question, context) pair it is asked to answer.
    #[derive(Default)]
    struct RecordingGeneration {
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl GenerationProvider for RecordingGeneration {
        async fn generate(&self, question: &str, context: Option<&str>) -> ProviderResult<String> {
            self.calls
                .lock()
                .await
                .push((question.to_owned(), context.map(str::to_owned)));
            Ok("the answer".to_owned())
        }
    }

    struct BrokenGeneration;

    #[async_trait]
    impl GenerationProvider for BrokenGeneration {
        async fn generate(&self, _q: &str, _c: Option<&str>) -> ProviderResult<String> {
            Err(ProviderError::unavailable("model offline"))
        }
    }

    fn pipeline(with_knowledge_base: bool) -> WorkflowDefinition {
        let mut nodes = vec![
            Node::new("q1", QueryConfig::default()),
            Node::new(
                "llm1",
                LlmConfig {
                    model: Some("gemini-2.0-flash".into()),
                    api_key: Some("key".into()),
                    ..Default::default()
                },
            ),
            Node::new("out1", OutputConfig::default()),
        ];
        let mut edges = vec![Edge::new("q1", "llm1"), Edge::new("llm1", "out1")];
        if with_knowledge_base {
            nodes.insert(1, Node::new("kb1", KnowledgeBaseConfig::default()));
            edges[0] = Edge::new("q1", "kb1");
            edges.insert(1, Edge::new("kb1", "llm1"));
        }
        WorkflowDefinition::new(nodes, edges)
    }

    fn engine_with(
        embedding: Arc<dyn EmbeddingProvider>,
        index: VectorIndex,
        generation: Arc<dyn GenerationProvider>,
    ) -> Engine {
        Engine::new(EngineConfig::default(), embedding, index, generation)
    }

    fn empty_index() -> VectorIndex {
        VectorIndex::new(Arc::new(MemoryIndex::new()))
    }

    async fn seeded_index() -> VectorIndex {
        let index = empty_index();
        index
            .upsert(vec![
                VectorRecord::new("c1", "refunds take 14 days", vec![1.0, 0.0])
                    .with_field("source", serde_json::json!("policy.pdf")),
                VectorRecord::new("c2", "contact support by email", vec![0.5, 0.5])
                    .with_field("source", serde_json::json!("faq.md")),
            ])
            .await
            .unwrap();
        index
    }

    #[tokio::test]
    async fn run_without_knowledge_base_generates_without_context() {
        let generation = Arc::new(RecordingGeneration::default());
        let engine = engine_with(Arc::new(AxisEmbedding), empty_index(), generation.clone());

        let result = engine.run("what now?", &pipeline(false)).await.unwrap();

        assert!(!result.has_context);
        assert!(result.sources.is_empty());
        assert_eq!(result.metadata.chunks_used, 0);
        assert_eq!(result.metadata.model, "gemini-2.0-flash");

        let calls = generation.calls.lock().await;
        assert_eq!(*calls, vec![("what now?".to_owned(), None)]);
    }

    #[tokio::test]
    async fn run_with_seeded_knowledge_base_passes_ordered_context() {
        let generation = Arc::new(RecordingGeneration::default());
        let engine = engine_with(Arc::new(AxisEmbedding), seeded_index().await, generation.clone());

        let result = engine
            .run("what is the refund policy?", &pipeline(true))
            .await
            .unwrap();

        assert!(result.has_context);
        assert_eq!(result.answer, "the answer");
        assert_eq!(result.sources.len(), 2);
        assert_eq!(result.sources[0]["source"], serde_json::json!("policy.pdf"));
        assert_eq!(result.metadata.chunks_used, 2);

        let calls = generation.calls.lock().await;
        let context = calls[0].1.as_deref().unwrap();
        assert_eq!(context, "refunds take 14 days\n\ncontact support by email");
    }

    #[tokio::test]
    async fn empty_retrieval_degrades_without_error() {
        let generation = Arc::new(RecordingGeneration::default());
        let engine = engine_with(Arc::new(AxisEmbedding), empty_index(), generation.clone());

        let result = engine.run("anything?", &pipeline(true)).await.unwrap();

        assert!(!result.has_context);
        assert!(result.sources.is_empty());
        let calls = generation.calls.lock().await;
        assert_eq!(calls[0].1, None);
    }

    #[tokio::test]
    async fn embedding_failure_degrades_without_error() {
        let generation = Arc::new(RecordingGeneration::default());
        let engine = engine_with(Arc::new(BrokenEmbedding), seeded_index().await, generation.clone());

        let result = engine.run("anything?", &pipeline(true)).await.unwrap();

        assert!(!result.has_context);
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn generation_failure_is_fatal_and_names_the_stage() {
        let engine = engine_with(
            Arc::new(AxisEmbedding),
            empty_index(),
            Arc::new(BrokenGeneration),
        );

        let err = engine.run("anything?", &pipeline(false)).await.unwrap_err();
        assert!(matches!(err, EngineError::Generation(_)));
        assert!(err.to_string().starts_with("generation failed"));
    }

    #[tokio::test]
    async fn missing_required_node_is_a_precondition_error() {
        let engine = engine_with(
            Arc::new(AxisEmbedding),
            empty_index(),
            Arc::new(RecordingGeneration::default()),
        );

        let mut definition = pipeline(false);
        definition.nodes.retain(|n| n.kind() != NodeKind::LlmEngine);

        let err = engine.run("anything?", &definition).await.unwrap_err();
        assert!(matches!(err, EngineError::MissingNode(NodeKind::LlmEngine)));
        assert_eq!(err.to_string(), "workflow has no llmEngine node");
    }

    #[tokio::test]
    async fn model_falls_back_to_default_when_unset() {
        let generation = Arc::new(RecordingGeneration::default());
        let engine = engine_with(Arc::new(AxisEmbedding), empty_index(), generation);

        let mut definition = pipeline(false);
        for node in &mut definition.nodes {
            if let crate::graph::NodeConfig::LlmEngine(config) = &mut node.config {
                config.model = None;
            }
        }

        let result = engine.run("anything?", &definition).await.unwrap();
        assert_eq!(result.metadata.model, "default");
    }
}
