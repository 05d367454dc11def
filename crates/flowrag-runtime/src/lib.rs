#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod engine;
mod error;
pub mod graph;
pub mod provider;
pub mod validate;

#[doc(hidden)]
pub mod prelude;

pub use error::{EngineError, EngineResult, RetrievalError};

/// Tracing target for runtime operations.
pub const TRACING_TARGET: &str = "flowrag_runtime";
