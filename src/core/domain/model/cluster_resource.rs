//! Wire models for cluster-wide resources.
//!
//! This module defines the structures returned by the `/cluster/resources` endpoint.
//! The response contains a heterogeneous list of resources (VMs, containers, storage, etc.),
//! each identified by a `type` field. These shapes are only used at ingestion time; the
//! selector works on the typed [`ResourceRecord`](super::resource_record::ResourceRecord).

use serde::{Deserialize, Serialize};

/// A resource discovered in the Proxmox cluster.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClusterResource {
    /// A QEMU virtual machine.
    Qemu(GuestResource),
    /// An LXC container.
    Lxc(GuestResource),
    /// A storage entity.
    Storage(StorageResource),
    /// A node in the cluster.
    Node(NodeResource),
    /// A resource pool.
    Pool(PoolResource),
    /// Anything else (`sdn`, `openvz`, ...). Ignored during ingestion.
    #[serde(other)]
    Other,
}

/// Common fields present in node-bound resources.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommonResourceFields {
    /// The Proxmox node where this resource resides.
    pub node: String,
    /// Unique resource identifier (e.g., `qemu/100`).
    pub id: String,
    /// Human‑readable name (may be absent).
    #[serde(default)]
    pub name: Option<String>,
    /// Resource status (e.g., `running`, `stopped`, `available`).
    #[serde(default)]
    pub status: String,
}

/// A QEMU virtual machine or LXC container.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GuestResource {
    #[serde(flatten)]
    pub common: CommonResourceFields,
    /// The guest identifier (unique per cluster).
    pub vmid: u32,
    /// Semicolon-separated tag list, as stored by Proxmox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Pool the guest belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,
    /// `1` when the guest is a template.
    #[serde(default)]
    pub template: u8,
}

/// A storage resource (e.g., directory, ZFS, LVM).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageResource {
    #[serde(flatten)]
    pub common: CommonResourceFields,
    /// Storage identifier (e.g., `local`, `nfs-storage`).
    pub storage: String,
}

/// A node resource (the node itself).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeResource {
    #[serde(flatten)]
    pub common: CommonResourceFields,
}

/// A resource pool. Pools are cluster-wide and carry no node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PoolResource {
    /// Unique resource identifier (e.g., `/pool/prod`).
    pub id: String,
    /// The pool name.
    pub pool: String,
}
