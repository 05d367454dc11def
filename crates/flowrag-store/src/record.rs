//! Stored workflow records and identifiers.

use derive_more::{Debug, Display, From, Into};
use flowrag_runtime::graph::WorkflowDefinition;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a persisted workflow.
///
/// Generated as `wf_` plus the first 8 hex characters of a random
/// UUID. Collision probability is treated as negligible and not
/// defended against.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct WorkflowId(String);

impl WorkflowId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("wf_{}", &hex[..8]))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkflowId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for WorkflowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A persisted workflow: immutable once created.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StoredWorkflow {
    /// Workflow identifier.
    pub id: WorkflowId,
    /// Human-readable name.
    pub name: String,
    /// The validated graph definition.
    pub definition: WorkflowDefinition,
    /// Creation time.
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_the_expected_shape() {
        let id = WorkflowId::generate();
        assert!(id.as_str().starts_with("wf_"));
        assert_eq!(id.as_str().len(), 11);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(WorkflowId::generate(), WorkflowId::generate());
    }
}
