#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod error;
mod memory;
mod record;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryBackend;
pub use record::{StoredWorkflow, WorkflowId};
pub use store::{DurableBackend, WorkflowStore};

/// Tracing target for store operations.
pub const TRACING_TARGET: &str = "flowrag_store";
