use crate::{
    ResolverConfig,
    core::domain::{
        error::{ProxmoxResult, ValidationError},
        inventory::Inventory,
        model::resource_record::VmRecord,
    },
    selector::application::{matcher::fold_eq, parser::Selector, snapshot::InventorySnapshot},
};

/// Resolves selector strings against an [`Inventory`] collaborator.
///
/// The resource list is fetched once per call. Pool members are fetched only for
/// pools that a `@pool-` term names and that exist in the snapshot. A failed pool
/// lookup behaves like an unknown pool: it contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct ResolveService {
    config: ResolverConfig,
}

impl ResolveService {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolves `selector` to the selected guests.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The inventory cannot provide the resource list
    /// - A maximum selector length was configured and the selector exceeds it
    pub async fn execute(
        &self,
        inventory: &dyn Inventory,
        selector: &str,
    ) -> ProxmoxResult<Vec<VmRecord>> {
        self.check_length(selector)?;

        let parsed = Selector::parse(selector);
        if parsed.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = self.build_snapshot(inventory, &parsed).await?;
        if self.config.check_allowed_tags {
            self.check_tags(inventory, &parsed).await;
        }

        let vms = parsed.resolve(&snapshot);
        if vms.is_empty() && self.config.warn_on_empty {
            tracing::warn!(selector = %selector, "0 resources selected");
        }
        Ok(vms)
    }

    fn check_length(&self, selector: &str) -> Result<(), ValidationError> {
        match self.config.max_selector_length {
            Some(max) if selector.len() > max => Err(ValidationError::ConstraintViolation(
                format!(
                    "Selector length {} exceeds the maximum of {}",
                    selector.len(),
                    max
                ),
            )),
            _ => Ok(()),
        }
    }

    async fn build_snapshot(
        &self,
        inventory: &dyn Inventory,
        selector: &Selector,
    ) -> ProxmoxResult<InventorySnapshot> {
        let mut snapshot = InventorySnapshot::new(inventory.resources().await?);

        let pools: Vec<String> = selector
            .pool_names()
            .into_iter()
            .filter_map(|name| snapshot.find_pool(name).map(str::to_string))
            .collect();

        for pool in pools {
            match inventory.pool_members(&pool).await {
                Ok(members) => snapshot.insert_pool_members(pool, members),
                Err(e) => {
                    tracing::warn!(pool = %pool, error = %e, "Pool member lookup failed, skipping pool");
                }
            }
        }
        Ok(snapshot)
    }

    async fn check_tags(&self, inventory: &dyn Inventory, selector: &Selector) {
        let tags = selector.tag_names();
        if tags.is_empty() {
            return;
        }

        let allowed = match inventory.allowed_tags().await {
            Ok(allowed) => allowed,
            Err(e) => {
                tracing::warn!(error = %e, "Could not fetch allowed tags");
                return;
            }
        };
        for tag in tags {
            if !allowed.iter().any(|a| fold_eq(a, tag)) {
                tracing::warn!(tag = %tag, "Selector references a tag that is not registered");
            }
        }
    }
}
