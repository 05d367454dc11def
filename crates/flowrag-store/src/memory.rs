//! In-memory durable backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::record::{StoredWorkflow, WorkflowId};
use crate::store::DurableBackend;

/// In-memory durable tier for tests and single-node deployments.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<HashMap<WorkflowId, StoredWorkflow>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns whether the backend holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DurableBackend for MemoryBackend {
    async fn put(&self, record: StoredWorkflow) -> StoreResult<()> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &WorkflowId) -> StoreResult<Option<StoredWorkflow>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<WorkflowId>> {
        Ok(self.records.read().await.keys().cloned().collect())
    }

    async fn delete(&self, id: &WorkflowId) -> StoreResult<bool> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}
