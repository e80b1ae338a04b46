//! foreman-inventory
//!
//! Ansible dynamic inventory script backed by the Foreman API.
//! Settings come from `foreman.ini`; the inventory is printed to stdout.

use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use foreman_client::HttpClient;
use foreman_inventory::InventoryBuilder;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod settings;

use cli::{Cli, Mode};
use settings::Settings;

/// Environment variable holding the log filter, e.g. `debug`
const LOG_ENV: &str = "FOREMAN_INVENTORY_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Logs go to stderr, stdout is reserved for the inventory
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load_default()?;
    debug!(?settings, "settings loaded");

    let client = HttpClient::connect(settings.client_config()).await?;
    let builder = InventoryBuilder::new(Arc::new(client));

    let inventory = build(&builder, &cli.mode()).await?;
    output::write_json(io::stdout().lock(), &inventory)?;

    Ok(())
}

/// Run the requested operation
async fn build(builder: &InventoryBuilder, mode: &Mode) -> Result<Value> {
    let value = match mode {
        Mode::All => serde_json::to_value(builder.all_hosts_with_vars().await?)?,
        Mode::Host(id) => serde_json::to_value(builder.host_detail(id).await?)?,
        Mode::List => serde_json::to_value(builder.grouped_inventory().await?)?,
        Mode::Empty => Value::Object(serde_json::Map::new()),
    };
    Ok(value)
}
