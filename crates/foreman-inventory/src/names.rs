//! Display names for resolved objects

use foreman_client::EntityKind;
use serde_json::Value;

/// Name an object is shown under in the inventory
///
/// Hostgroups use their `label` (the full nested path), operating systems
/// combine `name` and `major`, environments are lower-cased and everything
/// else uses `name`.
#[must_use]
pub fn display_name(kind: EntityKind, entity: &Value) -> Option<String> {
    match kind {
        EntityKind::Hostgroup => text_field(entity, "label"),
        EntityKind::Operatingsystem => {
            let name = text_field(entity, "name")?;
            match text_field(entity, "major") {
                Some(major) => Some(format!("{name}-{major}")),
                None => Some(name),
            }
        }
        EntityKind::Environment => text_field(entity, "name").map(|name| name.to_lowercase()),
        _ => text_field(entity, "name"),
    }
}

/// Read a scalar field as text; numbers are rendered, other types ignored
pub(crate) fn text_field(entity: &Value, key: &str) -> Option<String> {
    match entity.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operatingsystem() {
        let os = json!({"name": "CentOS", "major": "7"});
        assert_eq!(
            display_name(EntityKind::Operatingsystem, &os),
            Some("CentOS-7".to_string())
        );
    }

    #[test]
    fn test_operatingsystem_numeric_major() {
        let os = json!({"name": "Debian", "major": 12});
        assert_eq!(
            display_name(EntityKind::Operatingsystem, &os),
            Some("Debian-12".to_string())
        );
    }

    #[test]
    fn test_operatingsystem_without_major() {
        let os = json!({"name": "FreeBSD"});
        assert_eq!(
            display_name(EntityKind::Operatingsystem, &os),
            Some("FreeBSD".to_string())
        );
        assert_eq!(display_name(EntityKind::Operatingsystem, &json!({"major": "7"})), None);
    }

    #[test]
    fn test_environment_lowercased() {
        let env = json!({"name": "PRODUCTION"});
        assert_eq!(
            display_name(EntityKind::Environment, &env),
            Some("production".to_string())
        );
    }

    #[test]
    fn test_hostgroup_uses_label() {
        let group = json!({"label": "webservers", "name": "ignored"});
        assert_eq!(
            display_name(EntityKind::Hostgroup, &group),
            Some("webservers".to_string())
        );
        assert_eq!(display_name(EntityKind::Hostgroup, &json!({"name": "web"})), None);
    }

    #[test]
    fn test_other_kinds_use_name() {
        let domain = json!({"name": "example.com", "label": "nope"});
        for kind in [
            EntityKind::Domain,
            EntityKind::Subnet,
            EntityKind::Architecture,
            EntityKind::Model,
            EntityKind::ComputeResource,
        ] {
            assert_eq!(display_name(kind, &domain), Some("example.com".to_string()));
        }
    }

    #[test]
    fn test_non_scalar_fields_ignored() {
        assert_eq!(text_field(&json!({"name": null}), "name"), None);
        assert_eq!(text_field(&json!({"name": ["a"]}), "name"), None);
        assert_eq!(text_field(&json!("not an object"), "name"), None);
    }
}
