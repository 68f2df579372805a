//! Address book server - main entry point
//!
//! Builds the configured contact index and serves it over the Model Context
//! Protocol on stdio.

use address_book_index::ids::{IdGenerator, UuidGenerator};
use address_book_index::index::build_index;
use address_book_index::services::{AddressBookService, AddressBookServiceImpl};
use address_book_index::{AddressBookMcpServer, Config};
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let ids = Arc::new(UuidGenerator) as Arc<dyn IdGenerator>;
    let index = build_index(config.engine, ids);
    let service = Arc::new(AddressBookServiceImpl::new(index, config.max_query_length))
        as Arc<dyn AddressBookService>;

    let server = AddressBookMcpServer::new(service);
    info!(engine = %config.engine, "Address book server initialized");

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    address_book_index::server::run_server(server).await?;

    info!("Address book server shutdown complete");
    Ok(())
}
