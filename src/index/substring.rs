//! Exhaustive substring index.
//!
//! Every contiguous substring of every field is a key, so a field of `n` chars
//! contributes O(n²) keys and `find` is a single exact lookup. Keys keep the
//! caller's casing.
//!
//! Updates are additive: the new field values are indexed but the keys of the
//! old values are left in place, so a contact stays findable by text it no
//! longer contains. Delete only strips the keys of the current values. Lookups
//! resolve ids through the record store, so deleted contacts never surface.

use super::postings::PostingIndex;
use super::record_store::RecordStore;
use super::text::{all_substrings, unique};
use super::{ContactIndex, EngineKind};
use crate::domain::ContactId;
use crate::ids::IdGenerator;
use crate::models::{ContactCard, ContactUpdate, NewContact};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct SubstringIndex {
    ids: Arc<dyn IdGenerator>,
    records: RecordStore,
    postings: PostingIndex<()>,
}

impl SubstringIndex {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            records: RecordStore::new(),
            postings: PostingIndex::new(),
        }
    }

    fn keys_for(card: &ContactCard) -> HashSet<String> {
        unique(card.fields().flat_map(all_substrings))
    }

    fn index_card(&self, card: &ContactCard) {
        let keys = Self::keys_for(card);
        trace!(id = %card.id, keys = keys.len(), "indexing substrings");
        for key in &keys {
            self.postings.add(key, &card.id, ());
        }
    }

    /// Distinct keys currently in the index.
    pub fn key_count(&self) -> usize {
        self.postings.key_count()
    }

    /// Number of keys still listing `id`.
    pub fn occurrences(&self, id: &str) -> usize {
        self.postings.occurrences(id)
    }
}

impl ContactIndex for SubstringIndex {
    fn kind(&self) -> EngineKind {
        EngineKind::Substring
    }

    fn insert(&self, contacts: Vec<NewContact>) -> Vec<ContactCard> {
        contacts
            .into_iter()
            .map(|contact| {
                let card = ContactCard::from_new(self.ids.generate(), contact);
                self.records.insert(card.clone());
                self.index_card(&card);
                card
            })
            .collect()
    }

    fn find(&self, query: &str) -> Vec<ContactCard> {
        match self.postings.ids(query) {
            Some(ids) => self.records.resolve(ids),
            None => Vec::new(),
        }
    }

    fn update(&self, updates: Vec<ContactUpdate>) -> Vec<ContactCard> {
        updates
            .into_iter()
            .filter_map(|update| {
                let updated = self.records.modify(update.id.as_str(), |stored| {
                    let mut card = (**stored).clone();
                    card.merge(&update);
                    self.index_card(&card);
                    *stored = Arc::new(card.clone());
                    card
                });
                if updated.is_none() {
                    debug!(id = %update.id, "update skipped, unknown contact");
                }
                updated
            })
            .collect()
    }

    fn delete(&self, ids: &[ContactId]) -> usize {
        let mut deleted = 0;
        for id in ids {
            let Some(card) = self.records.remove(id.as_str()) else {
                continue;
            };
            for key in Self::keys_for(&card) {
                self.postings.remove(&key, id);
            }
            deleted += 1;
        }
        deleted
    }

    fn get(&self, id: &str) -> Option<ContactCard> {
        self.records.get(id).map(|card| (*card).clone())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
