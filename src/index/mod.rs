//! Contact index engines.
//!
//! Three interchangeable strategies implement [`ContactIndex`]:
//!
//! | Engine | Keys | Case | Update |
//! |--------|------|------|--------|
//! | [`SubstringIndex`] | every substring | sensitive | merge, additive re-index |
//! | [`BoundedKGramIndex`] | substrings of 1..=10 chars | insensitive | merge, reverse-index un-index |
//! | [`HybridIndex`] | n-grams {9,7,5,3,1} + tokens | insensitive | overwrite, symmetric un-index |
//!
//! One engine backs the live directory; [`build_index`] picks it from an
//! [`EngineKind`] at start-up. Engines own all of their state, are safe to share
//! across threads, and apply batches record by record with no rollback.

pub mod hybrid;
pub mod kgram;
pub mod postings;
pub mod record_store;
pub mod selector;
pub mod substring;
pub mod text;

pub use hybrid::HybridIndex;
pub use kgram::BoundedKGramIndex;
pub use postings::PostingIndex;
pub use record_store::RecordStore;
pub use selector::{build_index, EngineKind};
pub use substring::SubstringIndex;

use crate::domain::ContactId;
use crate::models::{ContactCard, ContactUpdate, NewContact};

/// The capability every index engine provides.
pub trait ContactIndex: Send + Sync {
    /// Which strategy this engine implements.
    fn kind(&self) -> EngineKind;

    /// Store and index new contacts, returning them with their generated ids.
    fn insert(&self, contacts: Vec<NewContact>) -> Vec<ContactCard>;

    /// Contacts matching `query` under this engine's rules, sorted by id.
    fn find(&self, query: &str) -> Vec<ContactCard>;

    /// Apply updates to existing contacts. Unknown ids are skipped; the
    /// returned cards reflect the stored state after each update.
    fn update(&self, updates: Vec<ContactUpdate>) -> Vec<ContactCard>;

    /// Remove contacts, returning how many ids were actually live.
    fn delete(&self, ids: &[ContactId]) -> usize;

    /// Fetch a single contact by id.
    fn get(&self, id: &str) -> Option<ContactCard>;

    /// Number of live contacts.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
