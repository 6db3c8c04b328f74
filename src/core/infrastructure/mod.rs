pub mod snapshot_inventory;
