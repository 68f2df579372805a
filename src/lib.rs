//! Address book index - an in-memory contact directory with interchangeable
//! search engines.
//!
//! Contacts carry a name, email and phone. Three index engines make them
//! searchable by text fragments, each trading memory for precision differently;
//! one engine is chosen at start-up and backs the whole directory.
//!
//! # Architecture
//!
//! - **index**: the engines, their shared key extraction and concurrent posting maps
//! - **models**: contact cards and request payloads
//! - **domain**: validated value objects
//! - **ids**: contact id generation
//! - **services**: request validation in front of the active engine
//! - **server**: MCP protocol server exposing the directory over stdio
//! - **config**: configuration from environment variables
//! - **observability**: operation metrics
//! - **error**: error types

pub mod config;
pub mod domain;
pub mod error;
pub mod ids;
pub mod index;
pub mod models;
pub mod observability;
pub mod server;
pub mod services;

pub use config::Config;
pub use domain::ContactId;
pub use error::{ConfigError, DirectoryError};
pub use index::{build_index, ContactIndex, EngineKind};
pub use models::{ContactCard, ContactUpdate, DeletedResponse, NewContact};
pub use server::AddressBookMcpServer;
pub use services::{AddressBookService, AddressBookServiceImpl};
