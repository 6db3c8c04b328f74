//! Typed inventory records.
//!
//! Wire data is converted once, at ingestion time, into one of these records so the
//! selector never has to look at loosely typed JSON.

use super::cluster_resource::{ClusterResource, GuestResource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator for [`ResourceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Node,
    Vm,
    Storage,
    Pool,
}

/// Guest flavour of a [`VmRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VmType {
    Qemu,
    Lxc,
}

impl fmt::Display for VmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmType::Qemu => f.write_str("qemu"),
            VmType::Lxc => f.write_str("lxc"),
        }
    }
}

/// A cluster node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeRecord {
    /// The node name, which is also its id.
    pub node: String,
    pub online: bool,
}

/// A QEMU virtual machine or LXC container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VmRecord {
    pub vmid: u32,
    pub name: String,
    /// Owning node.
    pub node: String,
    /// Tags in stored order and case.
    #[serde(default)]
    pub tags: Vec<String>,
    pub vm_type: VmType,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,
    #[serde(default)]
    pub template: bool,
}

/// A storage entity on a node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageRecord {
    pub storage: String,
    pub node: String,
}

/// A resource pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PoolRecord {
    pub pool: String,
}

/// One inventory entry. Within a kind, [`ResourceRecord::id`] is unique per snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceRecord {
    Node(NodeRecord),
    Vm(VmRecord),
    Storage(StorageRecord),
    Pool(PoolRecord),
}

impl ResourceRecord {
    /// Returns the kind discriminator.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRecord::Node(_) => ResourceKind::Node,
            ResourceRecord::Vm(_) => ResourceKind::Vm,
            ResourceRecord::Storage(_) => ResourceKind::Storage,
            ResourceRecord::Pool(_) => ResourceKind::Pool,
        }
    }

    /// Returns the stable identifier: the vmid for guests, the name otherwise.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            ResourceRecord::Node(n) => n.node.clone(),
            ResourceRecord::Vm(vm) => vm.vmid.to_string(),
            ResourceRecord::Storage(s) => s.storage.clone(),
            ResourceRecord::Pool(p) => p.pool.clone(),
        }
    }

    /// Returns the guest record if this is a VM or container.
    #[must_use]
    pub fn as_vm(&self) -> Option<&VmRecord> {
        match self {
            ResourceRecord::Vm(vm) => Some(vm),
            _ => None,
        }
    }

    /// Converts a wire resource into a typed record.
    ///
    /// Returns `None` for resource types the inventory does not model.
    #[must_use]
    pub fn from_cluster_resource(resource: ClusterResource) -> Option<Self> {
        match resource {
            ClusterResource::Qemu(guest) => Some(Self::Vm(VmRecord::from_guest(guest, VmType::Qemu))),
            ClusterResource::Lxc(guest) => Some(Self::Vm(VmRecord::from_guest(guest, VmType::Lxc))),
            ClusterResource::Storage(st) => Some(Self::Storage(StorageRecord {
                storage: st.storage,
                node: st.common.node,
            })),
            ClusterResource::Node(n) => Some(Self::Node(NodeRecord {
                online: n.common.status == "online",
                node: n.common.node,
            })),
            ClusterResource::Pool(p) => Some(Self::Pool(PoolRecord { pool: p.pool })),
            ClusterResource::Other => None,
        }
    }
}

impl VmRecord {
    fn from_guest(guest: GuestResource, vm_type: VmType) -> Self {
        Self {
            vmid: guest.vmid,
            name: guest.common.name.unwrap_or_default(),
            node: guest.common.node,
            tags: split_tags(guest.tags.as_deref().unwrap_or_default()),
            vm_type,
            status: guest.common.status,
            pool: guest.pool.filter(|p| !p.is_empty()),
            template: guest.template == 1,
        }
    }
}

/// Splits a stored `;`-separated tag list.
pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::model::cluster_resource::{CommonResourceFields, NodeResource};

    fn guest(vmid: u32, tags: Option<&str>) -> GuestResource {
        GuestResource {
            common: CommonResourceFields {
                node: "pve1".to_string(),
                id: format!("qemu/{}", vmid),
                name: Some("web01".to_string()),
                status: "running".to_string(),
            },
            vmid,
            tags: tags.map(str::to_string),
            pool: Some(String::new()),
            template: 1,
        }
    }

    #[test]
    fn test_guest_ingestion() {
        let record =
            ResourceRecord::from_cluster_resource(ClusterResource::Lxc(guest(105, Some("a; B ;;c"))))
                .unwrap();
        assert_eq!(record.kind(), ResourceKind::Vm);
        assert_eq!(record.id(), "105");

        let vm = record.as_vm().unwrap();
        assert_eq!(vm.tags, vec!["a", "B", "c"]);
        assert_eq!(vm.vm_type, VmType::Lxc);
        assert_eq!(vm.pool, None);
        assert!(vm.template);
    }

    #[test]
    fn test_guest_without_tags() {
        let record =
            ResourceRecord::from_cluster_resource(ClusterResource::Qemu(guest(100, None))).unwrap();
        assert!(record.as_vm().unwrap().tags.is_empty());
    }

    #[test]
    fn test_node_online_flag() {
        let node = |status: &str| {
            ClusterResource::Node(NodeResource {
                common: CommonResourceFields {
                    node: "pve2".to_string(),
                    id: "node/pve2".to_string(),
                    name: None,
                    status: status.to_string(),
                },
            })
        };

        match ResourceRecord::from_cluster_resource(node("online")) {
            Some(ResourceRecord::Node(n)) => assert!(n.online),
            other => panic!("Expected node record, got {:?}", other),
        }
        match ResourceRecord::from_cluster_resource(node("offline")) {
            Some(ResourceRecord::Node(n)) => assert!(!n.online),
            other => panic!("Expected node record, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_resource_is_skipped() {
        assert_eq!(ResourceRecord::from_cluster_resource(ClusterResource::Other), None);
    }
}
