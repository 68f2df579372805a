//! Data models for the address book.
//!
//! This module contains the contact card and the request payloads the
//! directory accepts for creating, updating and deleting cards.

pub mod contact;

pub use contact::{ContactCard, ContactRef, ContactUpdate, DeletedResponse, NewContact};
