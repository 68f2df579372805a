//! MCP server for the address book.
//!
//! Exposes the directory's create, search, update and delete operations as
//! Model Context Protocol tools over stdio.

pub mod handlers;

pub use handlers::AddressBookMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the address book MCP server with stdio transport.
///
/// Communicates via stdin/stdout and returns once the client disconnects.
pub async fn run_server(server: AddressBookMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
