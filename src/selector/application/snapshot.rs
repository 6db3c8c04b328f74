use super::matcher::fold_eq;
use crate::core::domain::model::resource_record::{ResourceRecord, VmRecord};
use std::collections::HashMap;

/// A read-only view of the cluster used for one resolution.
///
/// Pool membership is attached separately because it comes from a different
/// collaborator call than the resource list.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    records: Vec<ResourceRecord>,
    pool_members: HashMap<String, Vec<VmRecord>>,
}

impl InventorySnapshot {
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self {
            records,
            pool_members: HashMap::new(),
        }
    }

    /// Attaches the members of a pool, keyed by its canonical name.
    pub fn with_pool_members(mut self, pool: impl Into<String>, members: Vec<VmRecord>) -> Self {
        self.insert_pool_members(pool, members);
        self
    }

    pub fn insert_pool_members(&mut self, pool: impl Into<String>, members: Vec<VmRecord>) {
        self.pool_members.insert(pool.into(), members);
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Iterates the guest records in snapshot order.
    pub fn vms(&self) -> impl Iterator<Item = &VmRecord> {
        self.records.iter().filter_map(ResourceRecord::as_vm)
    }

    /// Resolves a pool name as typed to the canonical name of a known pool.
    ///
    /// An exact match wins over a case-insensitive one.
    pub fn find_pool(&self, name: &str) -> Option<&str> {
        let pools: Vec<&str> = self
            .records
            .iter()
            .filter_map(|r| match r {
                ResourceRecord::Pool(p) => Some(p.pool.as_str()),
                _ => None,
            })
            .collect();

        pools
            .iter()
            .find(|p| **p == name)
            .or_else(|| pools.iter().find(|p| fold_eq(p, name)))
            .copied()
    }

    /// Members attached for a canonical pool name; empty if none were attached.
    pub fn pool_members(&self, pool: &str) -> &[VmRecord] {
        self.pool_members.get(pool).map(Vec::as_slice).unwrap_or_default()
    }
}
