use crate::{ProxmoxError, ProxmoxJolly, ProxmoxResult, ScheduleError, SnapshotInventory};
use std::io::Write;

fn cluster_resources() -> serde_json::Value {
    serde_json::json!({
        "data": [
            { "type": "node", "node": "pve1", "id": "node/pve1", "status": "online" },
            { "type": "node", "node": "pve2", "id": "node/pve2", "status": "online" },
            {
                "type": "qemu", "vmid": 100, "node": "pve1", "id": "qemu/100",
                "name": "webserver01", "status": "running", "tags": "prod;web", "pool": "prod"
            },
            {
                "type": "qemu", "vmid": 101, "node": "pve1", "id": "qemu/101",
                "name": "oldweb", "status": "stopped", "tags": "legacy"
            },
            {
                "type": "lxc", "vmid": 102, "node": "pve2", "id": "lxc/102",
                "name": "db01", "status": "running", "pool": "prod"
            },
            {
                "type": "storage", "storage": "local", "node": "pve1",
                "id": "storage/pve1/local", "status": "available", "plugintype": "dir"
            },
            { "type": "pool", "id": "/pool/prod", "pool": "prod" }
        ]
    })
}

fn client() -> ProxmoxJolly {
    let inventory = SnapshotInventory::from_json_str(&cluster_resources().to_string()).unwrap();
    ProxmoxJolly::builder().inventory(inventory).build().unwrap()
}

async fn vmids(jolly: &ProxmoxJolly, selector: &str) -> ProxmoxResult<Vec<u32>> {
    Ok(jolly
        .select_vms(selector)
        .await?
        .into_iter()
        .map(|vm| vm.vmid)
        .collect())
}

#[tokio::test]
async fn test_select_from_wire_payload() -> ProxmoxResult<()> {
    let jolly = client();

    assert_eq!(vmids(&jolly, "@all").await?, vec![100, 101, 102]);
    assert_eq!(vmids(&jolly, "@pool-prod").await?, vec![100, 102]);
    assert_eq!(vmids(&jolly, "@node-pve1,-@tag-legacy").await?, vec![100]);
    assert_eq!(vmids(&jolly, "%WEB%,-100").await?, vec![101]);
    Ok(())
}

#[tokio::test]
async fn test_select_from_file() -> ProxmoxResult<()> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(cluster_resources().to_string().as_bytes())
        .unwrap();

    let inventory = SnapshotInventory::from_json_file(file.path()).await?;
    let jolly = ProxmoxJolly::builder()
        .inventory(inventory)
        .check_allowed_tags(false)
        .build()?;

    assert_eq!(vmids(&jolly, "@tag-web,102").await?, vec![100, 102]);
    Ok(())
}

#[tokio::test]
async fn test_selector_degrades_while_schedule_fails_fast() {
    let jolly = client();

    // A broken clause only drops out of the selection.
    let selected = vmids(&jolly, "abc:10,@pool-missing,101").await.unwrap();
    assert_eq!(selected, vec![101]);

    // A broken clause rejects the whole schedule.
    let result = jolly.parse_schedule("mon,tue 08:00,99");
    assert!(matches!(
        result,
        Err(ProxmoxError::Schedule(ScheduleError::OutOfRange { .. }))
    ));
}

#[tokio::test]
async fn test_unmatched_selector_is_not_an_error() {
    let jolly = client();
    assert!(vmids(&jolly, "nomatch").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_resolution() {
    let jolly = std::sync::Arc::new(client());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let jolly = jolly.clone();
            tokio::spawn(async move { vmids(&jolly, "@all,-101").await })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result, vec![100, 102]);
    }
}
