//! Contact model representing a card in the address book.

use crate::domain::ContactId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared reference to a ContactCard.
///
/// Engines that index record references rather than bare ids hand out the
/// same `Arc` from every key a card occupies.
pub type ContactRef = Arc<ContactCard>;

/// A contact stored in the address book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactCard {
    /// Unique identifier, assigned on insert and never reused
    pub id: ContactId,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Email address
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
}

/// Payload for creating a contact. The id is assigned by the directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Payload for changing an existing contact.
///
/// How absent fields are treated depends on the engine: the substring and
/// k-gram engines keep the stored value, the hybrid engine clears it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactUpdate {
    pub id: ContactId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Result of a delete call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedResponse {
    /// Number of contacts actually removed
    pub deleted: usize,
}

impl ContactCard {
    /// Build a card from a creation payload and a freshly generated id.
    pub fn from_new(id: ContactId, contact: NewContact) -> Self {
        Self {
            id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }

    /// The searchable field values that are present, in name/email/phone order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        [&self.name, &self.email, &self.phone]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }

    /// Overwrite only the fields present in `update`.
    pub fn merge(&mut self, update: &ContactUpdate) {
        if let Some(ref name) = update.name {
            self.name = Some(name.clone());
        }
        if let Some(ref email) = update.email {
            self.email = Some(email.clone());
        }
        if let Some(ref phone) = update.phone {
            self.phone = Some(phone.clone());
        }
    }

    /// Replace all three fields with the values in `update`, absent or not.
    pub fn overwrite(&mut self, update: &ContactUpdate) {
        self.name = update.name.clone();
        self.email = update.email.clone();
        self.phone = update.phone.clone();
    }
}

impl ContactUpdate {
    /// An update that changes nothing, to be filled in field by field.
    pub fn new(id: ContactId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            phone: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl NewContact {
    /// Convenience constructor used heavily in tests and benchmarks.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }
}
