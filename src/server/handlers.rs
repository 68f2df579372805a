//! MCP tool handlers for the address book server.
//!
//! This module implements the four directory tools using the rmcp SDK's
//! tool_router pattern.

use crate::domain::ContactId;
use crate::error::DirectoryError;
use crate::models::{ContactUpdate, NewContact};
use crate::services::AddressBookService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing the contact directory.
#[derive(Clone)]
pub struct AddressBookMcpServer {
    service: Arc<dyn AddressBookService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for AddressBookMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "address-book-index".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(format!(
                "In-memory contact directory - create, search, update and delete contact cards. Search engine: {}.",
                self.service.engine()
            )),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct ContactFieldsParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreateContactsParams {
    contacts: Vec<ContactFieldsParams>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchContactsParams {
    query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateContactParams {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateContactsParams {
    contacts: Vec<UpdateContactParams>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DeleteContactsParams {
    ids: Vec<String>,
}

impl From<ContactFieldsParams> for NewContact {
    fn from(params: ContactFieldsParams) -> Self {
        NewContact {
            name: params.name,
            email: params.email,
            phone: params.phone,
        }
    }
}

impl TryFrom<UpdateContactParams> for ContactUpdate {
    type Error = DirectoryError;

    fn try_from(params: UpdateContactParams) -> Result<Self, Self::Error> {
        Ok(ContactUpdate {
            id: ContactId::new(params.id)?,
            name: params.name,
            email: params.email,
            phone: params.phone,
        })
    }
}

// Caller mistakes become INVALID_PARAMS so clients can tell them apart
fn to_mcp_error(e: DirectoryError) -> McpError {
    let code = if e.is_client_error() {
        ErrorCode::INVALID_PARAMS
    } else {
        ErrorCode::INTERNAL_ERROR
    };
    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn to_internal_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(to_internal_error)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

// Tool router implementation
#[tool_router]
impl AddressBookMcpServer {
    /// Create a new address book MCP server.
    pub fn new(service: Arc<dyn AddressBookService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Create one or more contacts.
    #[tool(
        description = "Create one or more contacts. Each contact may have a name, email and phone; the created cards are returned with their generated ids."
    )]
    async fn create_contacts(
        &self,
        params: Parameters<CreateContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!("MCP Handler: create_contacts, count={}", params.contacts.len());

        let contacts = params.contacts.into_iter().map(NewContact::from).collect();
        let created = self
            .service
            .insert_contacts(contacts)
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "created": created,
        }))
    }

    /// Search contacts by name, email or phone text.
    #[tool(
        description = "Search contacts by a fragment of their name, email or phone number. Matching rules depend on the configured index engine."
    )]
    async fn search_contacts(
        &self,
        params: Parameters<SearchContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let results = self
            .service
            .search(&params.query)
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "query": params.query,
            "result_count": results.len(),
            "results": results,
        }))
    }

    /// Update existing contacts.
    #[tool(
        description = "Update existing contacts by id. Unknown ids are skipped; only contacts that were actually updated are returned."
    )]
    async fn update_contacts(
        &self,
        params: Parameters<UpdateContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let updates = params
            .contacts
            .into_iter()
            .map(ContactUpdate::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_mcp_error)?;

        let updated = self
            .service
            .update_contacts(updates)
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "updated": updated,
        }))
    }

    /// Delete contacts by id.
    #[tool(description = "Delete contacts by id. Returns how many of the ids belonged to existing contacts.")]
    async fn delete_contacts(
        &self,
        params: Parameters<DeleteContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .service
            .delete_contacts(params.ids)
            .map_err(|e| {
                tracing::warn!("Failed to delete contacts: {}", e);
                to_mcp_error(e)
            })?;

        json_result(&serde_json::to_value(response).map_err(to_internal_error)?)
    }
}
