//! Prelude module for convenient imports.
//!
//! ```rust
//! use flowrag_runtime::prelude::*;
//! ```

pub use crate::engine::{Engine, EngineConfig, ExecutionResult, RunMetadata};
pub use crate::error::{EngineError, EngineResult};
pub use crate::graph::{Edge, Node, NodeConfig, NodeId, NodeKind, WorkflowDefinition};
pub use crate::provider::{EmbeddingProvider, GenerationProvider, ProviderError, ProviderResult};
pub use crate::validate::{ValidationReport, validate_graph};
