//! Node identifier, node kinds, and per-kind configuration.

use derive_more::{Debug, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identifier of a node, unique within a workflow.
///
/// Ids are assigned by the workflow author (e.g. `"query_1"`); the
/// validator rejects duplicates.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the id is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The structural role of a node in the pipeline.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Debug, strum::Display, strum::EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum NodeKind {
    /// Pipeline entry point carrying the user's question.
    UserQuery,
    /// Optional retrieval stage backed by a vector index.
    KnowledgeBase,
    /// Text generation stage.
    LlmEngine,
    /// Pipeline exit point.
    Output,
}

/// Configuration for a `userQuery` node.
#[derive(Default, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Placeholder question shown in the builder UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Configuration for a `knowledgeBase` node.
#[derive(Default, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// Uploaded document descriptors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<serde_json::Value>,
}

impl KnowledgeBaseConfig {
    /// Returns whether any documents have been uploaded.
    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }
}

/// Configuration for an `llmEngine` node.
#[derive(Default, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key for the generation provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Custom system prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl LlmConfig {
    /// Returns whether a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Returns whether a non-empty model is selected.
    pub fn has_model(&self) -> bool {
        self.model.as_deref().is_some_and(|m| !m.is_empty())
    }
}

/// Configuration for an `output` node.
#[derive(Default, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Static text shown before the first run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Per-kind node configuration.
///
/// Serialized with the kind under `type` and the payload under `data`,
/// matching the builder wire shape `{id, type, data}`. Decoding raw
/// JSON through [`crate::validate::validate_graph`] is the one place
/// unknown kinds and malformed payloads are rejected; everything
/// downstream works on these typed variants.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize, From)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum NodeConfig {
    /// Pipeline entry point.
    UserQuery(QueryConfig),
    /// Retrieval stage.
    KnowledgeBase(KnowledgeBaseConfig),
    /// Generation stage.
    LlmEngine(LlmConfig),
    /// Pipeline exit point.
    Output(OutputConfig),
}

impl NodeConfig {
    /// Returns the kind of this configuration.
    pub const fn kind(&self) -> NodeKind {
        match self {
            NodeConfig::UserQuery(_) => NodeKind::UserQuery,
            NodeConfig::KnowledgeBase(_) => NodeKind::KnowledgeBase,
            NodeConfig::LlmEngine(_) => NodeKind::LlmEngine,
            NodeConfig::Output(_) => NodeKind::Output,
        }
    }

    /// Returns the engine configuration if this is an `llmEngine` node.
    pub const fn as_llm_engine(&self) -> Option<&LlmConfig> {
        match self {
            NodeConfig::LlmEngine(config) => Some(config),
            _ => None,
        }
    }

    /// Returns the knowledge base configuration if applicable.
    pub const fn as_knowledge_base(&self) -> Option<&KnowledgeBaseConfig> {
        match self {
            NodeConfig::KnowledgeBase(config) => Some(config),
            _ => None,
        }
    }
}

/// A workflow node: id, optional display name, and configuration.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier, unique within the workflow.
    pub id: NodeId,
    /// Display name of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Kind-specific configuration.
    #[serde(flatten)]
    pub config: NodeConfig,
}

impl Node {
    /// Creates a new node.
    pub fn new(id: impl Into<NodeId>, config: impl Into<NodeConfig>) -> Self {
        Self {
            id: id.into(),
            name: None,
            config: config.into(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the node's kind.
    pub const fn kind(&self) -> NodeKind {
        self.config.kind()
    }
}
