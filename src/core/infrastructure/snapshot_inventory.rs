//! In-memory inventory built from a `/cluster/resources` payload.

use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult, ValidationError},
    inventory::Inventory,
    model::{
        cluster_resource::ClusterResource,
        resource_record::{ResourceRecord, VmRecord},
    },
};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Accepts either the bare resource array or the API's `{"data": [...]}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResourcesPayload {
    Envelope { data: Vec<ClusterResource> },
    Bare(Vec<ClusterResource>),
}

/// An [`Inventory`] over a fixed list of records.
///
/// Pool membership is derived from each guest's `pool` field. Unless set with
/// [`SnapshotInventory::with_allowed_tags`], the allowed tags are every tag seen on a guest.
#[derive(Debug, Clone, Default)]
pub struct SnapshotInventory {
    records: Vec<ResourceRecord>,
    allowed_tags: Option<Vec<String>>,
}

impl SnapshotInventory {
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self {
            records,
            allowed_tags: None,
        }
    }

    /// Overrides the registered tag list.
    pub fn with_allowed_tags(mut self, tags: Vec<String>) -> Self {
        self.allowed_tags = Some(tags);
        self
    }

    /// Parses a `/cluster/resources` JSON payload.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Validation` if the payload is not a resource list.
    pub fn from_json_str(json: &str) -> ProxmoxResult<Self> {
        let payload: ResourcesPayload = serde_json::from_str(json).map_err(|e| {
            ValidationError::Format(format!("Invalid cluster resources payload: {}", e))
        })?;
        let resources = match payload {
            ResourcesPayload::Envelope { data } => data,
            ResourcesPayload::Bare(list) => list,
        };

        let records: Vec<ResourceRecord> = resources
            .into_iter()
            .filter_map(ResourceRecord::from_cluster_resource)
            .collect();
        tracing::debug!(count = records.len(), "Loaded inventory snapshot");
        Ok(Self::new(records))
    }

    /// Reads and parses a `/cluster/resources` JSON file.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Connection` if the file cannot be read and
    /// `ProxmoxError::Validation` if it cannot be parsed.
    pub async fn from_json_file(path: impl AsRef<Path>) -> ProxmoxResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            ProxmoxError::Connection(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Returns the records held by this snapshot.
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }
}

#[async_trait]
impl Inventory for SnapshotInventory {
    async fn resources(&self) -> ProxmoxResult<Vec<ResourceRecord>> {
        Ok(self.records.clone())
    }

    async fn pool_members(&self, pool: &str) -> ProxmoxResult<Vec<VmRecord>> {
        Ok(self
            .records
            .iter()
            .filter_map(ResourceRecord::as_vm)
            .filter(|vm| vm.pool.as_deref() == Some(pool))
            .cloned()
            .collect())
    }

    async fn allowed_tags(&self) -> ProxmoxResult<Vec<String>> {
        if let Some(tags) = &self.allowed_tags {
            return Ok(tags.clone());
        }
        let seen: BTreeSet<&String> = self
            .records
            .iter()
            .filter_map(ResourceRecord::as_vm)
            .flat_map(|vm| vm.tags.iter())
            .collect();
        Ok(seen.into_iter().cloned().collect())
    }
}
