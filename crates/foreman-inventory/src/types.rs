//! Inventory output types
//!
//! All maps are ordered so the rendered JSON has sorted keys.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Group key for hosts without a hostgroup label
pub const UNGROUPED: &str = "null";

// ============================================================================
// Host variables
// ============================================================================

/// Variables Ansible sees for a single host
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct HostVars {
    /// Foreman host id
    pub id: Value,
    /// Primary IP address
    pub ip: Value,
    /// Host name (FQDN)
    pub name: Value,
    /// Build/config status as reported by Foreman
    pub status: Value,
    /// Hardware model name
    pub model: Option<String>,
    /// Compute resource name
    pub compute_resource: Option<String>,
    /// Domain name
    pub domain: Option<String>,
    /// Subnet name
    pub subnet: Option<String>,
    /// Architecture name
    pub architecture: Option<String>,
    /// Hostgroup label
    pub hostgroup: Option<String>,
    /// Creation timestamp, as Foreman formats it
    pub created: Value,
    /// Last update timestamp, as Foreman formats it
    pub updated: Value,
    /// Operating system as `<name>-<major>`
    pub os: Option<String>,
    /// Lower-cased environment name; omitted when the host has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Address Ansible connects to, same as `ip`
    pub ansible_ssh_host: Value,
}

/// Detail for one host; an unknown host renders as `{}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostDetail(pub Option<HostVars>);

impl HostDetail {
    /// Detail for a host Foreman does not know
    #[must_use]
    pub fn not_found() -> Self {
        Self(None)
    }
}

impl From<HostVars> for HostDetail {
    fn from(vars: HostVars) -> Self {
        Self(Some(vars))
    }
}

impl Serialize for HostDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(vars) => vars.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

// ============================================================================
// Groups
// ============================================================================

/// Host names keyed by hostgroup label
///
/// Hosts keep the order they were listed in within their group.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Groups(BTreeMap<String, Vec<String>>);

impl Groups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a host to a group; `None` files it under [`UNGROUPED`]
    pub fn push(&mut self, group: Option<String>, host: impl Into<String>) {
        let key = group.unwrap_or_else(|| UNGROUPED.to_string());
        self.0.entry(key).or_default().push(host.into());
    }

    /// Hosts in a group
    #[must_use]
    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.0.get(group).map(Vec::as_slice)
    }

    /// Distinct host names across all groups
    #[must_use]
    pub fn host_names(&self) -> BTreeSet<&str> {
        self.0.values().flatten().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Full inventory
// ============================================================================

/// Reserved `_meta` section of a full inventory
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Meta {
    /// Variables per host name
    pub hostvars: BTreeMap<String, HostDetail>,
}

/// Groups plus every host's variables, so Ansible needs no `--host` calls
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct FullInventory {
    #[serde(flatten)]
    pub groups: Groups,
    #[serde(rename = "_meta")]
    pub meta: Meta,
}
