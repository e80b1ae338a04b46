//! Entity kinds and identifiers exposed by the Foreman API

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds of objects the inventory resolves through the API
///
/// Each kind knows its REST collection and the envelope key Foreman wraps a
/// single object in, e.g. `GET /api/hostgroups/3` returns `{"hostgroup": {...}}`
/// on API v1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Architecture,
    Subnet,
    Domain,
    ComputeResource,
    Model,
    Environment,
    Hostgroup,
    Operatingsystem,
    Host,
}

impl EntityKind {
    /// Every kind, in a stable order
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Architecture,
        EntityKind::Subnet,
        EntityKind::Domain,
        EntityKind::ComputeResource,
        EntityKind::Model,
        EntityKind::Environment,
        EntityKind::Hostgroup,
        EntityKind::Operatingsystem,
        EntityKind::Host,
    ];

    /// Singular name, also used as the envelope key
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Architecture => "architecture",
            EntityKind::Subnet => "subnet",
            EntityKind::Domain => "domain",
            EntityKind::ComputeResource => "compute_resource",
            EntityKind::Model => "model",
            EntityKind::Environment => "environment",
            EntityKind::Hostgroup => "hostgroup",
            EntityKind::Operatingsystem => "operatingsystem",
            EntityKind::Host => "host",
        }
    }

    /// REST collection segment under `/api`
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Architecture => "architectures",
            EntityKind::Subnet => "subnets",
            EntityKind::Domain => "domains",
            EntityKind::ComputeResource => "compute_resources",
            EntityKind::Model => "models",
            EntityKind::Environment => "environments",
            EntityKind::Hostgroup => "hostgroups",
            EntityKind::Operatingsystem => "operatingsystems",
            EntityKind::Host => "hosts",
        }
    }

    /// Name of the foreign key field referencing this kind on a host record
    #[must_use]
    pub fn foreign_key(self) -> String {
        format!("{}_id", self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a Foreman object
///
/// Foreman accepts numeric ids everywhere and host names for hosts, so the id
/// is kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Read an id out of a JSON value; `null`, empty strings and non-scalar
    /// values carry no id.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Strip the `{"<kind>": {...}}` envelope Foreman v1 puts around objects.
///
/// Objects that are not wrapped (API v2) are returned unchanged.
#[must_use]
pub fn unwrap_envelope(kind: EntityKind, value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(kind.as_str()) => {
            map.remove(kind.as_str()).unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names() {
        assert_eq!(EntityKind::ComputeResource.as_str(), "compute_resource");
        assert_eq!(EntityKind::ComputeResource.collection(), "compute_resources");
        assert_eq!(EntityKind::Operatingsystem.foreign_key(), "operatingsystem_id");
        assert_eq!(EntityKind::Hostgroup.to_string(), "hostgroup");
    }

    #[test]
    fn test_kind_serde_matches_as_str() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn test_id_from_value() {
        assert_eq!(EntityId::from_value(&json!(42)), Some(EntityId::from(42_u64)));
        assert_eq!(
            EntityId::from_value(&json!("web01.example.com")),
            Some(EntityId::from("web01.example.com"))
        );
        assert_eq!(EntityId::from_value(&json!(null)), None);
        assert_eq!(EntityId::from_value(&json!("")), None);
        assert_eq!(EntityId::from_value(&json!({"id": 1})), None);
    }

    #[test]
    fn test_unwrap_envelope() {
        let wrapped = json!({"hostgroup": {"id": 3, "label": "web"}});
        assert_eq!(
            unwrap_envelope(EntityKind::Hostgroup, wrapped),
            json!({"id": 3, "label": "web"})
        );

        let bare = json!({"id": 3, "label": "web"});
        assert_eq!(unwrap_envelope(EntityKind::Hostgroup, bare.clone()), bare);

        // a different single key is not an envelope
        let other = json!({"domain": {"id": 1}});
        assert_eq!(unwrap_envelope(EntityKind::Hostgroup, other.clone()), other);
    }
}
