#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod error;
mod memory;
mod store;

pub use error::{VectorError, VectorResult};
pub use memory::MemoryIndex;
pub use store::{SearchResult, VectorIndex, VectorIndexBackend, VectorRecord};

/// Tracing target for vector index operations.
pub const TRACING_TARGET: &str = "flowrag_vector";
