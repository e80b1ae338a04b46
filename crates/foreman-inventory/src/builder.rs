//! Inventory assembly from the Foreman API

use std::collections::BTreeMap;
use std::sync::Arc;

use foreman_client::types::unwrap_envelope;
use foreman_client::{EntityId, EntityKind, ForemanApi};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::cache::{EntityCache, Lookup};
use crate::error::Result;
use crate::types::{FullInventory, Groups, HostDetail, HostVars, Meta};

/// Builds Ansible inventory from Foreman
///
/// Every referenced object is fetched once per builder; later references are
/// answered from the cache.
pub struct InventoryBuilder {
    api: Arc<dyn ForemanApi>,
    cache: EntityCache,
}

impl InventoryBuilder {
    /// Create a builder on top of an API client
    pub fn new(api: Arc<dyn ForemanApi>) -> Self {
        Self {
            api,
            cache: EntityCache::new(),
        }
    }

    /// Objects fetched so far
    #[must_use]
    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    /// Resolve a reference to an object, fetching it on first use
    ///
    /// A missing id yields [`Lookup::Unset`] without touching the API.
    ///
    /// # Errors
    /// Returns an error if the API request fails.
    #[instrument(skip(self, kind), fields(kind = %kind))]
    pub async fn resolve(&self, kind: EntityKind, id: Option<&EntityId>) -> Result<Lookup> {
        let Some(id) = id else {
            return Ok(Lookup::Unset);
        };

        if let Some(cached) = self.cache.get(kind, id).await {
            return Ok(cached);
        }

        debug!(%id, "cache miss, fetching");
        let entity = self.api.show(kind, id).await?;
        let lookup = match &entity {
            Some(entity) => Lookup::Found(entity.clone()),
            None => Lookup::NotFound,
        };
        self.cache.insert(kind, id.clone(), entity).await;

        Ok(lookup)
    }

    /// Display name of the object a host references through `<kind>_id`
    ///
    /// # Errors
    /// Returns an error if the API request fails.
    pub async fn resolve_name(&self, kind: EntityKind, host: &Value) -> Result<Option<String>> {
        let id = host.get(kind.foreign_key()).and_then(EntityId::from_value);
        let lookup = self.resolve(kind, id.as_ref()).await?;
        Ok(lookup.display_name(kind))
    }

    /// Variables for a single host, looked up by id or name
    ///
    /// A host Foreman does not know yields an empty detail.
    ///
    /// # Errors
    /// Returns an error if an API request fails.
    #[instrument(skip(self))]
    pub async fn host_detail(&self, id: &EntityId) -> Result<HostDetail> {
        let lookup = self.resolve(EntityKind::Host, Some(id)).await?;
        let Some(host) = lookup.entity() else {
            debug!(%id, "host not found");
            return Ok(HostDetail::not_found());
        };

        let field = |key: &str| host.get(key).cloned().unwrap_or(Value::Null);
        let ip = field("ip");
        let vars = HostVars {
            id: field("id"),
            ip: ip.clone(),
            name: field("name"),
            status: field("status"),
            model: self.resolve_name(EntityKind::Model, host).await?,
            compute_resource: self.resolve_name(EntityKind::ComputeResource, host).await?,
            domain: self.resolve_name(EntityKind::Domain, host).await?,
            subnet: self.resolve_name(EntityKind::Subnet, host).await?,
            architecture: self.resolve_name(EntityKind::Architecture, host).await?,
            hostgroup: self.resolve_name(EntityKind::Hostgroup, host).await?,
            created: field("created_at"),
            updated: field("updated_at"),
            os: self.resolve_name(EntityKind::Operatingsystem, host).await?,
            environment: nested_environment(host),
            ansible_ssh_host: ip,
        };

        Ok(vars.into())
    }

    /// Every host, grouped by hostgroup label
    ///
    /// # Errors
    /// Returns an error if an API request fails.
    #[instrument(skip(self))]
    pub async fn grouped_inventory(&self) -> Result<Groups> {
        let hosts = self.list_hosts().await?;

        let mut groups = Groups::new();
        for host in &hosts {
            let Some(name) = host.get("name").and_then(Value::as_str) else {
                warn!(host = %host, "skipping host without a name");
                continue;
            };
            let group = self.resolve_name(EntityKind::Hostgroup, host).await?;
            groups.push(group, name);
        }

        info!(hosts = hosts.len(), groups = groups.len(), "inventory built");
        Ok(groups)
    }

    /// Every host grouped, plus each host's variables under `_meta.hostvars`
    ///
    /// # Errors
    /// Returns an error if an API request fails.
    #[instrument(skip(self))]
    pub async fn all_hosts_with_vars(&self) -> Result<FullInventory> {
        let groups = self.grouped_inventory().await?;

        let mut hostvars = BTreeMap::new();
        for name in groups.host_names() {
            let detail = self.host_detail(&EntityId::from(name)).await?;
            hostvars.insert(name.to_string(), detail);
        }
        debug!(hosts = hostvars.len(), "collected host variables");

        Ok(FullInventory {
            groups,
            meta: Meta { hostvars },
        })
    }

    /// Walk the host index page by page until an empty page
    async fn list_hosts(&self) -> Result<Vec<Value>> {
        let mut hosts = Vec::new();
        let mut page = 1;
        loop {
            let entries = self.api.index_hosts(page).await?;
            if entries.is_empty() {
                break;
            }
            debug!(page, count = entries.len(), "host page");
            hosts.extend(
                entries
                    .into_iter()
                    .map(|entry| unwrap_envelope(EntityKind::Host, entry)),
            );
            page += 1;
        }
        Ok(hosts)
    }
}

/// Environment name nested as `environment.environment.name` on the host
fn nested_environment(host: &Value) -> Option<String> {
    host.get("environment")?
        .get("environment")?
        .get("name")?
        .as_str()
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_environment() {
        let host = json!({"environment": {"environment": {"name": "Production"}}});
        assert_eq!(nested_environment(&host), Some("production".to_string()));
    }

    #[test]
    fn test_nested_environment_missing_levels() {
        assert_eq!(nested_environment(&json!({})), None);
        assert_eq!(nested_environment(&json!({"environment": null})), None);
        assert_eq!(nested_environment(&json!({"environment": {"name": "flat"}})), None);
        assert_eq!(
            nested_environment(&json!({"environment": {"environment": {}}})),
            None
        );
        assert_eq!(
            nested_environment(&json!({"environment": {"environment": {"name": 5}}})),
            None
        );
    }
}
