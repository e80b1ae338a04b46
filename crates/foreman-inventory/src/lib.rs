//! foreman-inventory: Ansible inventory built from Foreman
//!
//! Lists hosts, resolves the objects they reference (hostgroups, domains,
//! operating systems, ...) through a per-run cache, and shapes the result the
//! way Ansible expects from a dynamic inventory source.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use foreman_client::{ClientConfig, HttpClient};
//! use foreman_inventory::InventoryBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::connect(ClientConfig::new(
//!     "https://foreman.example.com",
//!     "admin",
//!     "changeme",
//! ))
//! .await?;
//! let builder = InventoryBuilder::new(Arc::new(client));
//!
//! let groups = builder.grouped_inventory().await?;
//! println!("{}", serde_json::to_string_pretty(&groups)?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cache;
pub mod error;
pub mod names;
pub mod types;

pub use builder::InventoryBuilder;
pub use cache::{EntityCache, Lookup};
pub use error::{InventoryError, Result};
pub use names::display_name;
pub use types::{FullInventory, Groups, HostDetail, HostVars, Meta, UNGROUPED};
