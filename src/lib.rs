//! Jolly VM selectors and calendar schedule expressions for Proxmox VE tooling.
//!
//! Two small engines live here:
//!
//! - **Selectors** such as `@node-pve1,-101,@tag-prod` resolve against an inventory
//!   snapshot to a deduplicated list of guests. Resolution is best-effort: a term that
//!   is malformed or matches nothing only drops out of the result.
//! - **Schedules** such as `mon,tue 08:00` parse into normalized weekday, hour and
//!   minute sets. Parsing is strict: any bad token is an error.

mod config;
pub mod core;
pub mod schedule;
pub mod selector;

#[cfg(test)]
mod tests;

pub use crate::config::ResolverConfig;
pub use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult, ScheduleError, ValidationError},
    inventory::Inventory,
    model::{
        resource_record::{
            NodeRecord, PoolRecord, ResourceKind, ResourceRecord, StorageRecord, VmRecord, VmType,
        },
        schedule_spec::ScheduleSpec,
    },
    value_object::{SelectorTerm, TermKind, Weekday},
};
pub use crate::core::infrastructure::snapshot_inventory::SnapshotInventory;
pub use crate::schedule::application::parser::parse_schedule;
pub use crate::selector::application::{
    parser::Selector, service::resolve_service::ResolveService, snapshot::InventorySnapshot,
};

use std::sync::Arc;

/// Entry point for resolving selectors and parsing schedules.
///
/// # Examples
///
/// ```no_run
/// use proxmox_jolly::{ProxmoxJolly, ProxmoxResult, SnapshotInventory};
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let inventory = SnapshotInventory::from_json_file("resources.json").await?;
///     let jolly = ProxmoxJolly::builder()
///         .inventory(inventory)
///         .warn_on_empty(true)
///         .build()?;
///
///     let vms = jolly.select_vms("@node-pve1,-101").await?;
///     let schedule = jolly.parse_schedule("mon..fri 2:30")?;
///     println!("{} guests, {}", vms.len(), schedule);
///     Ok(())
/// }
/// ```
pub struct ProxmoxJolly {
    inventory: Arc<dyn Inventory>,
    service: ResolveService,
}

/// Builder for ProxmoxJolly configuration
#[derive(Default)]
pub struct ProxmoxJollyBuilder {
    inventory: Option<Arc<dyn Inventory>>,
    config: ResolverConfig,
}

impl ProxmoxJollyBuilder {
    pub fn inventory(mut self, inventory: impl Inventory + 'static) -> Self {
        self.inventory = Some(Arc::new(inventory));
        self
    }

    /// Uses an already shared inventory.
    pub fn shared_inventory(mut self, inventory: Arc<dyn Inventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn check_allowed_tags(mut self, enabled: bool) -> Self {
        self.config.check_allowed_tags = enabled;
        self
    }

    pub fn warn_on_empty(mut self, enabled: bool) -> Self {
        self.config.warn_on_empty = enabled;
        self
    }

    /// Rejects selectors longer than `length` bytes. Off unless set.
    pub fn max_selector_length(mut self, length: usize) -> Self {
        self.config.max_selector_length = Some(length);
        self
    }

    /// Validates the configuration and builds the client.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Validation` if no inventory was set or the
    /// configuration is invalid.
    pub fn build(self) -> ProxmoxResult<ProxmoxJolly> {
        let inventory = self.inventory.ok_or_else(|| ValidationError::Field {
            field: "inventory".to_string(),
            message: "Inventory is required".to_string(),
        })?;
        self.config.validate()?;

        Ok(ProxmoxJolly {
            inventory,
            service: ResolveService::new(self.config),
        })
    }
}

impl ProxmoxJolly {
    /// Creates a new builder for ProxmoxJolly configuration
    pub fn builder() -> ProxmoxJollyBuilder {
        ProxmoxJollyBuilder::default()
    }

    /// Resolves a selector to the matching guests.
    ///
    /// An empty selector yields an empty list without touching the inventory.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The inventory cannot provide the resource list
    /// - A maximum selector length was configured and the selector exceeds it
    ///
    /// Unknown pools, unmatched names and malformed ranges are not errors.
    pub async fn select_vms(&self, selector: &str) -> ProxmoxResult<Vec<VmRecord>> {
        self.service.execute(self.inventory.as_ref(), selector).await
    }

    /// Parses a schedule expression.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Schedule` if the expression is rejected.
    pub fn parse_schedule(&self, schedule: &str) -> ProxmoxResult<ScheduleSpec> {
        Ok(parse_schedule(schedule)?)
    }
}
