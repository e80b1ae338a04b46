//! Per-run object cache

use std::collections::HashMap;

use foreman_client::{EntityId, EntityKind};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::names::display_name;

/// Outcome of resolving a reference to a Foreman object
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The source record carried no id, nothing was fetched
    Unset,
    /// Foreman was asked and does not know the object
    NotFound,
    /// The object as Foreman returned it
    Found(Value),
}

impl Lookup {
    /// The resolved object, if any
    #[must_use]
    pub fn entity(&self) -> Option<&Value> {
        match self {
            Lookup::Found(entity) => Some(entity),
            Lookup::Unset | Lookup::NotFound => None,
        }
    }

    /// Display name of the resolved object
    #[must_use]
    pub fn display_name(&self, kind: EntityKind) -> Option<String> {
        self.entity().and_then(|entity| display_name(kind, entity))
    }
}

/// Objects fetched during this run, partitioned by kind
///
/// Not-found answers are cached as well, so every (kind, id) pair is fetched
/// at most once. Entries never expire.
#[derive(Debug, Default)]
pub struct EntityCache {
    entries: RwLock<HashMap<EntityKind, HashMap<EntityId, Option<Value>>>>,
}

impl EntityCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached outcome for `(kind, id)`, `None` on a cache miss
    pub async fn get(&self, kind: EntityKind, id: &EntityId) -> Option<Lookup> {
        let entries = self.entries.read().await;
        let cached = entries.get(&kind)?.get(id)?;
        debug!(%kind, %id, "cache hit");
        Some(match cached {
            Some(entity) => Lookup::Found(entity.clone()),
            None => Lookup::NotFound,
        })
    }

    /// Record the answer Foreman gave for `(kind, id)`
    pub async fn insert(&self, kind: EntityKind, id: EntityId, entity: Option<Value>) {
        let mut entries = self.entries.write().await;
        entries.entry(kind).or_default().insert(id, entity);
    }

    /// Number of cached objects of one kind
    pub async fn len(&self, kind: EntityKind) -> usize {
        let entries = self.entries.read().await;
        entries.get(&kind).map_or(0, HashMap::len)
    }

    /// Total number of cached objects
    pub async fn total(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().map(HashMap::len).sum()
    }
}
