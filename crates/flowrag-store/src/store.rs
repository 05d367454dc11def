//! Workflow store with a read-through cache.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use flowrag_runtime::graph::WorkflowDefinition;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::TRACING_TARGET;
use crate::error::{StoreError, StoreResult};
use crate::record::{StoredWorkflow, WorkflowId};

/// Durable tier for workflow records.
///
/// Implementations are conventional keyed-record stores; ordering of
/// `list` results is unspecified.
#[async_trait]
pub trait DurableBackend: Send + Sync {
    /// Writes a record, replacing any previous record with the same id.
    async fn put(&self, record: StoredWorkflow) -> StoreResult<()>;

    /// Reads a record, or `None` if absent.
    async fn get(&self, id: &WorkflowId) -> StoreResult<Option<StoredWorkflow>>;

    /// Lists the ids of all stored records.
    async fn list(&self) -> StoreResult<Vec<WorkflowId>>;

    /// Deletes a record; returns whether one existed.
    async fn delete(&self, id: &WorkflowId) -> StoreResult<bool>;
}

/// Keyed persistence for validated workflow definitions.
///
/// Composes a fast in-process cache over a durable backend: `get`
/// checks the cache first and repopulates it on a miss (read-through).
/// Concurrent misses for the same id may both hit the durable tier;
/// the cache insert is atomic and last writer wins.
///
/// The store does not validate: callers run the graph validator
/// before `create`.
pub struct WorkflowStore {
    cache: RwLock<HashMap<WorkflowId, Arc<StoredWorkflow>>>,
    durable: Arc<dyn DurableBackend>,
}

impl WorkflowStore {
    /// Creates a store over the given durable backend.
    pub fn new(durable: Arc<dyn DurableBackend>) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            durable,
        }
    }

    /// Persists a validated definition and returns its new id.
    pub async fn create(
        &self,
        name: impl Into<String>,
        definition: WorkflowDefinition,
    ) -> StoreResult<WorkflowId> {
        let id = WorkflowId::generate();
        let record = StoredWorkflow {
            id: id.clone(),
            name: name.into(),
            definition,
            created_at: Timestamp::now(),
        };

        self.durable.put(record.clone()).await?;
        self.cache
            .write()
            .await
            .insert(id.clone(), Arc::new(record));

        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %id,
            "Workflow created"
        );
        Ok(id)
    }

    /// Fetches a workflow by id, consulting the cache first.
    pub async fn get(&self, id: &WorkflowId) -> StoreResult<Arc<StoredWorkflow>> {
        if let Some(record) = self.cache.read().await.get(id) {
            return Ok(record.clone());
        }

        let record = self
            .durable
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let record = Arc::new(record);
        self.cache
            .write()
            .await
            .insert(id.clone(), record.clone());

        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %id,
            "Cache repopulated from durable tier"
        );
        Ok(record)
    }

    /// Lists all stored workflow ids.
    pub async fn list(&self) -> StoreResult<Vec<WorkflowId>> {
        self.durable.list().await
    }

    /// Deletes a workflow from both tiers; returns whether it existed.
    pub async fn delete(&self, id: &WorkflowId) -> StoreResult<bool> {
        self.cache.write().await.remove(id);
        let existed = self.durable.delete(id).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %id,
            existed,
            "Workflow deleted"
        );
        Ok(existed)
    }
}

impl std::fmt::Debug for WorkflowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowStore").finish_non_exhaustive()
    }
}
