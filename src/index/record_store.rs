//! Per-engine id → contact mapping.

use crate::domain::ContactId;
use crate::models::{ContactCard, ContactRef};
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent storage of the live contact cards of one engine.
pub struct RecordStore {
    records: DashMap<ContactId, ContactRef>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Store a card, returning the shared reference now held by the store.
    pub fn insert(&self, card: ContactCard) -> ContactRef {
        let card = Arc::new(card);
        self.records.insert(card.id.clone(), Arc::clone(&card));
        card
    }

    pub fn get(&self, id: &str) -> Option<ContactRef> {
        self.records.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, id: &str) -> Option<ContactRef> {
        self.records.remove(id).map(|(_, card)| card)
    }

    /// Run `f` with exclusive access to the stored card.
    ///
    /// Other writers to the same card wait until `f` returns, which keeps a
    /// card's un-index/re-index sequence from interleaving with another update
    /// or a delete of it. `f` must not call back into this store.
    pub fn modify<R>(&self, id: &str, f: impl FnOnce(&mut ContactRef) -> R) -> Option<R> {
        self.records
            .get_mut(id)
            .map(|mut entry| f(entry.value_mut()))
    }

    /// Dereference ids to owned cards, sorted by id.
    ///
    /// Ids with no live card are skipped.
    pub fn resolve(&self, ids: impl IntoIterator<Item = ContactId>) -> Vec<ContactCard> {
        let mut cards: Vec<ContactCard> = ids
            .into_iter()
            .filter_map(|id| self.get(id.as_str()))
            .map(|card| (*card).clone())
            .collect();
        cards.sort_by(|a, b| a.id.cmp(&b.id));
        cards
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
