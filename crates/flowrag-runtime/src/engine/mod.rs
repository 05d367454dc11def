//! Workflow execution engine.

mod config;
mod executor;
mod outcome;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use executor::Engine;
pub use outcome::{ExecutionResult, RunMetadata, SourceMetadata};
