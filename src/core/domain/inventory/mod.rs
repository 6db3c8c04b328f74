//! The inventory collaborator consumed by selector resolution.

use crate::core::domain::{
    error::ProxmoxResult,
    model::resource_record::{ResourceRecord, VmRecord},
};
use async_trait::async_trait;

/// Source of cluster resource snapshots.
///
/// Implementations may perform network I/O. The resolver calls each method at most
/// once per term that needs it and does not retry, cache, or rate-limit; those
/// policies belong to the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Returns a point-in-time list of all resources (nodes, guests, storage, pools).
    async fn resources(&self) -> ProxmoxResult<Vec<ResourceRecord>>;

    /// Returns the guests that are members of the given pool.
    async fn pool_members(&self, pool: &str) -> ProxmoxResult<Vec<VmRecord>>;

    /// Returns the cluster-wide list of registered tags.
    async fn allowed_tags(&self) -> ProxmoxResult<Vec<String>>;
}
