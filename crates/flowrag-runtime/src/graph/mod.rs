//! Workflow graph structures and node types.
//!
//! This module provides the typed graph representation for workflows:
//! - [`WorkflowDefinition`]: ordered nodes and edges (JSON-friendly)
//! - [`Node`], [`NodeId`], [`NodeKind`]: typed nodes
//! - [`NodeConfig`]: per-kind configuration, decoded once at the boundary
//! - [`Edge`]: connections between nodes

pub(crate) mod decode;
mod definition;
mod edge;
mod node;

pub use definition::WorkflowDefinition;
pub use edge::Edge;
pub use node::{
    KnowledgeBaseConfig, LlmConfig, Node, NodeConfig, NodeId, NodeKind, OutputConfig, QueryConfig,
};
