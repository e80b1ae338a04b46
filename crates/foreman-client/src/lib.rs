//! foreman-client: read-only client for the Foreman REST API
//!
//! Provides the [`ForemanApi`] trait the inventory is built against and an
//! HTTP implementation of it.
//!
//! # Example
//!
//! ```no_run
//! use foreman_client::{ClientConfig, EntityId, EntityKind, ForemanApi, HttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("https://foreman.example.com", "admin", "changeme");
//! let client = HttpClient::connect(config).await?;
//!
//! // First page of hosts
//! let hosts = client.index_hosts(1).await?;
//!
//! // Single hostgroup by id
//! let group = client.show(EntityKind::Hostgroup, &EntityId::from(3_u64)).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::{ClientError, Result};
pub use http::{ClientConfig, HttpClient};
pub use traits::ForemanApi;
pub use types::{EntityId, EntityKind};
