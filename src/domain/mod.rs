//! Domain value objects and types.
//!
//! Contact ids are opaque strings handed out by an [`crate::ids::IdGenerator`].
//! `ContactId` guarantees an id is never empty once it crosses the service boundary.

pub mod contact_id;
pub mod errors;

pub use contact_id::ContactId;
pub use errors::ValidationError;
