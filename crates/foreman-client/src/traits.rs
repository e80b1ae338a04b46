//! Upstream API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{EntityId, EntityKind};

/// Read access to the Foreman API used by the inventory
#[async_trait]
pub trait ForemanApi: Send + Sync {
    /// Fetch one page of hosts; an empty page marks the end of the listing.
    ///
    /// Entries are returned as Foreman sends them, possibly still wrapped in
    /// a `{"host": {...}}` envelope.
    async fn index_hosts(&self, page: u64) -> Result<Vec<Value>>;

    /// Fetch a single object, unwrapped from its envelope.
    ///
    /// Returns `Ok(None)` when Foreman reports the object does not exist.
    async fn show(&self, kind: EntityKind, id: &EntityId) -> Result<Option<Value>>;
}
