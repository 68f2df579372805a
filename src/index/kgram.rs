//! Bounded k-gram inverted index with a reverse index.
//!
//! Field values are lowercased and every substring of 1 to [`MAX_KEY_LENGTH`]
//! chars becomes a key, which caps a field's contribution at O(n · 10) keys.
//! Keys map straight to shared record references, so `find` needs no second
//! lookup.
//!
//! A reverse index remembers the exact key set each contact produced. Update
//! and delete walk that set instead of the forward index, removing the contact
//! from each key and dropping keys that become empty.
//!
//! | Operation | Cost                                  |
//! |-----------|---------------------------------------|
//! | Insert    | O(n · 10) keys per field              |
//! | Find      | O(1) hash lookup                      |
//! | Update    | O(old keys + new keys)                |
//! | Delete    | O(keys of the contact)                |

use super::postings::PostingIndex;
use super::record_store::RecordStore;
use super::text::bounded_substrings;
use super::{ContactIndex, EngineKind};
use crate::domain::ContactId;
use crate::ids::IdGenerator;
use crate::models::{ContactCard, ContactRef, ContactUpdate, NewContact};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Longest substring indexed, in chars.
pub const MAX_KEY_LENGTH: usize = 10;

pub struct BoundedKGramIndex {
    ids: Arc<dyn IdGenerator>,
    records: RecordStore,
    postings: PostingIndex<ContactRef>,
    reverse: DashMap<ContactId, HashSet<String>>,
}

impl BoundedKGramIndex {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            records: RecordStore::new(),
            postings: PostingIndex::new(),
            reverse: DashMap::new(),
        }
    }

    fn keys_for(card: &ContactCard) -> HashSet<String> {
        let mut keys = HashSet::new();
        for field in card.fields() {
            let lowered = field.to_lowercase();
            keys.extend(
                bounded_substrings(&lowered, MAX_KEY_LENGTH)
                    .into_iter()
                    .map(str::to_string),
            );
        }
        keys
    }

    /// Post `card` under all of its keys and record them in the reverse index.
    fn index_card(&self, card: &ContactRef) {
        let keys = Self::keys_for(card);
        trace!(id = %card.id, keys = keys.len(), "indexing k-grams");
        for key in &keys {
            self.postings.add(key, &card.id, Arc::clone(card));
        }
        self.reverse.insert(card.id.clone(), keys);
    }

    /// Remove `id` from every key the reverse index lists for it.
    fn unindex(&self, id: &ContactId) {
        if let Some((_, keys)) = self.reverse.remove(id.as_str()) {
            for key in &keys {
                self.postings.remove(key, id);
            }
        }
    }

    /// Whether the reverse index still tracks `id`.
    pub fn has_reverse_entry(&self, id: &str) -> bool {
        self.reverse.contains_key(id)
    }

    /// Keys recorded for `id` in the reverse index.
    pub fn reverse_keys(&self, id: &str) -> Option<HashSet<String>> {
        self.reverse.get(id).map(|keys| keys.clone())
    }

    /// Distinct keys currently in the forward index.
    pub fn key_count(&self) -> usize {
        self.postings.key_count()
    }

    /// Number of forward keys still listing `id`.
    pub fn occurrences(&self, id: &str) -> usize {
        self.postings.occurrences(id)
    }
}

impl ContactIndex for BoundedKGramIndex {
    fn kind(&self) -> EngineKind {
        EngineKind::BoundedKGram
    }

    fn insert(&self, contacts: Vec<NewContact>) -> Vec<ContactCard> {
        contacts
            .into_iter()
            .map(|contact| {
                let card = self
                    .records
                    .insert(ContactCard::from_new(self.ids.generate(), contact));
                self.index_card(&card);
                (*card).clone()
            })
            .collect()
    }

    fn find(&self, query: &str) -> Vec<ContactCard> {
        if query.is_empty() {
            return Vec::new();
        }
        let mut cards: Vec<ContactCard> = self
            .postings
            .values(&query.to_lowercase())
            .into_iter()
            .map(|card| (*card).clone())
            .collect();
        cards.sort_by(|a, b| a.id.cmp(&b.id));
        cards
    }

    fn update(&self, updates: Vec<ContactUpdate>) -> Vec<ContactCard> {
        updates
            .into_iter()
            .filter_map(|update| {
                let updated = self.records.modify(update.id.as_str(), |stored| {
                    self.unindex(&update.id);
                    let mut card = (**stored).clone();
                    card.merge(&update);
                    let fresh = Arc::new(card);
                    self.index_card(&fresh);
                    *stored = Arc::clone(&fresh);
                    (*fresh).clone()
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
            if self.records.remove(id.as_str()).is_none() {
                continue;
            }
            self.unindex(id);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialGenerator;

    fn engine() -> BoundedKGramIndex {
        BoundedKGramIndex::new(Arc::new(SequentialGenerator::default()))
    }

    fn ann() -> NewContact {
        NewContact::new("Ann", "a@b.com", "123")
    }

    #[test]
    fn test_windows_up_to_max_length() {
        let index = engine();
        index.insert(vec![NewContact::new("Alexandria Ocasio", "", "")]);

        // 10 chars: indexed
        assert_eq!(index.find("alexandria").len(), 1);
        assert_eq!(index.find("lexandria ").len(), 1);
        // 11 chars: beyond the window
        assert!(index.find("alexandria ").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let index = engine();
        index.insert(vec![NewContact::new("John Smith", "JOHN@ACME.COM", "")]);

        assert_eq!(index.find("SMITH").len(), 1);
        assert_eq!(index.find("acme").len(), 1);
        assert_eq!(index.find("jOhN").len(), 1);
    }

    #[test]
    fn test_empty_and_unknown_query() {
        let index = engine();
        index.insert(vec![ann()]);

        assert!(index.find("").is_empty());
        assert!(index.find("zzz").is_empty());
    }

    #[test]
    fn test_reverse_index_tracks_keys() {
        let index = engine();
        let id = index.insert(vec![ann()])[0].id.clone();

        let keys = index.reverse_keys(id.as_str()).unwrap();
        assert!(keys.contains("ann"));
        assert!(keys.contains("a@b.com"));
        assert!(keys.contains("23"));
        assert_eq!(keys.len(), index.occurrences(id.as_str()));
    }

    #[test]
    fn test_update_merges_and_strips_stale_keys() {
        let index = engine();
        let id = index.insert(vec![ann()])[0].id.clone();

        let updated = index.update(vec![ContactUpdate::new(id.clone()).with_email("ann@zeta.io")]);
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].name.as_deref(), Some("Ann"));
        assert_eq!(updated[0].email.as_deref(), Some("ann@zeta.io"));
        assert_eq!(updated[0].phone.as_deref(), Some("123"));

        assert!(index.find("b.com").is_empty());
        assert_eq!(index.find("zeta").len(), 1);
        // Keys of untouched fields are re-posted with the new card
        let by_name = index.find("ann");
        assert_eq!(by_name[0].email.as_deref(), Some("ann@zeta.io"));
        assert!(!index.reverse_keys(id.as_str()).unwrap().contains("b.com"));
    }

    #[test]
    fn test_delete_clears_forward_and_reverse() {
        let index = engine();
        let inserted = index.insert(vec![ann(), NewContact::new("Annabel", "", "")]);
        let id = inserted[0].id.clone();

        assert_eq!(index.delete(&[id.clone()]), 1);
        assert!(!index.has_reverse_entry(id.as_str()));
        assert_eq!(index.occurrences(id.as_str()), 0);
        assert!(index.find("123").is_empty());
        // Shared key survives for the other contact
        let remaining = index.find("ann");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, inserted[1].id);
    }

    #[test]
    fn test_delete_prunes_empty_keys() {
        let index = engine();
        let id = index.insert(vec![ann()])[0].id.clone();
        index.delete(&[id]);
        assert_eq!(index.key_count(), 0);
    }

    #[test]
    fn test_delete_twice_counts_once() {
        let index = engine();
        let id = index.insert(vec![ann()])[0].id.clone();
        assert_eq!(index.delete(&[id.clone(), id.clone()]), 1);
        assert_eq!(index.delete(&[id]), 0);
    }
}
