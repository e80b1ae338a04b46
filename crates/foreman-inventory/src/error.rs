//! Error types for foreman-inventory

use foreman_client::ClientError;
use thiserror::Error;

/// Errors that can occur while building the inventory
///
/// Objects Foreman does not know about are not errors; they resolve to empty
/// values in the output.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Request to the Foreman API failed
    #[error("Foreman API request failed: {0}")]
    Api(#[from] ClientError),
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
