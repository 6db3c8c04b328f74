mod integration;

use crate::{InventorySnapshot, NodeRecord, PoolRecord, ResourceRecord, StorageRecord, VmRecord, VmType};

pub(crate) fn vm(vmid: u32, name: &str, node: &str, tags: &[&str], pool: Option<&str>) -> VmRecord {
    VmRecord {
        vmid,
        name: name.to_string(),
        node: node.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        vm_type: if vmid >= 200 { VmType::Lxc } else { VmType::Qemu },
        status: "running".to_string(),
        pool: pool.map(str::to_string),
        template: false,
    }
}

/// Two nodes, five guests, two pools (`dev` is empty).
pub(crate) fn fixture_records() -> Vec<ResourceRecord> {
    vec![
        ResourceRecord::Node(NodeRecord {
            node: "pve1".to_string(),
            online: true,
        }),
        ResourceRecord::Node(NodeRecord {
            node: "pve2".to_string(),
            online: false,
        }),
        ResourceRecord::Vm(vm(100, "webserver01", "pve1", &["prod", "web"], Some("prod"))),
        ResourceRecord::Vm(vm(101, "oldweb", "pve1", &["Legacy"], None)),
        ResourceRecord::Vm(vm(102, "db01", "pve2", &[], None)),
        ResourceRecord::Vm(vm(103, "DB02", "PVE2", &["prod"], Some("prod"))),
        ResourceRecord::Vm(vm(200, "dns", "pve2", &["infra"], None)),
        ResourceRecord::Storage(StorageRecord {
            storage: "local".to_string(),
            node: "pve1".to_string(),
        }),
        ResourceRecord::Pool(PoolRecord {
            pool: "prod".to_string(),
        }),
        ResourceRecord::Pool(PoolRecord {
            pool: "dev".to_string(),
        }),
    ]
}

/// The fixture with pool membership already attached.
pub(crate) fn fixture_snapshot() -> InventorySnapshot {
    let records = fixture_records();
    let prod: Vec<VmRecord> = records
        .iter()
        .filter_map(ResourceRecord::as_vm)
        .filter(|vm| vm.pool.as_deref() == Some("prod"))
        .cloned()
        .collect();
    InventorySnapshot::new(records)
        .with_pool_members("prod", prod)
        .with_pool_members("dev", Vec::new())
}
