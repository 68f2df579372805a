//! Hybrid n-gram + token index.
//!
//! Each lowercased field value feeds two structures:
//!
//! - an n-gram index of sliding windows of 9, 7, 5, 3 and 1 chars, which
//!   catches fragments from the middle of a word;
//! - a token index of the fragments left after splitting on `@ . _ -`,
//!   whitespace and comma, which catches whole words and field segments.
//!
//! A query is resolved against both. The n-gram stage walks the window sizes
//! from longest to shortest and stops at the first window of the query that has
//! any postings; that window's ids are the n-gram matches. The token stage
//! unions the postings of every query token. When both stages produce ids the
//! result is their intersection, otherwise whichever stage matched wins.
//!
//! Updates overwrite all three fields from the payload, absent fields included.

use super::postings::PostingIndex;
use super::record_store::RecordStore;
use super::text::{ngrams, tokenize};
use super::{ContactIndex, EngineKind};
use crate::domain::ContactId;
use crate::ids::IdGenerator;
use crate::models::{ContactCard, ContactUpdate, NewContact};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Window sizes, in the order the query stage tries them.
pub const NGRAM_SIZES: [usize; 5] = [9, 7, 5, 3, 1];

pub struct HybridIndex {
    ids: Arc<dyn IdGenerator>,
    records: RecordStore,
    ngrams: PostingIndex<()>,
    tokens: PostingIndex<()>,
}

/// Merge the two stages of a lookup.
///
/// `ngram` is `None` when no window size matched at all, which is different
/// from matching an empty set.
pub fn combine(ngram: Option<HashSet<ContactId>>, token: HashSet<ContactId>) -> HashSet<ContactId> {
    if token.is_empty() {
        return ngram.unwrap_or_default();
    }
    match ngram {
        None => token,
        Some(ngram) => ngram.intersection(&token).cloned().collect(),
    }
}

impl HybridIndex {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            records: RecordStore::new(),
            ngrams: PostingIndex::new(),
            tokens: PostingIndex::new(),
        }
    }

    fn ngram_keys(card: &ContactCard) -> HashSet<String> {
        let mut keys = HashSet::new();
        for field in card.fields() {
            let lowered = field.to_lowercase();
            for k in NGRAM_SIZES {
                keys.extend(ngrams(&lowered, k).into_iter().map(str::to_string));
            }
        }
        keys
    }

    fn token_keys(card: &ContactCard) -> HashSet<String> {
        card.fields().flat_map(tokenize).collect()
    }

    fn index_card(&self, card: &ContactCard) {
        let grams = Self::ngram_keys(card);
        let tokens = Self::token_keys(card);
        trace!(id = %card.id, ngrams = grams.len(), tokens = tokens.len(), "indexing card");
        for key in &grams {
            self.ngrams.add(key, &card.id, ());
        }
        for key in &tokens {
            self.tokens.add(key, &card.id, ());
        }
    }

    fn unindex_card(&self, card: &ContactCard) {
        for key in Self::ngram_keys(card) {
            self.ngrams.remove(&key, &card.id);
        }
        for key in Self::token_keys(card) {
            self.tokens.remove(&key, &card.id);
        }
    }

    /// Ids of the first query window, longest size first, that has postings.
    fn ngram_matches(&self, query: &str) -> Option<HashSet<ContactId>> {
        NGRAM_SIZES.iter().find_map(|&k| {
            ngrams(query, k)
                .into_iter()
                .find_map(|gram| self.ngrams.ids(gram))
        })
    }

    /// Union of the postings of every query token.
    fn token_matches(&self, query: &str) -> HashSet<ContactId> {
        tokenize(query)
            .iter()
            .filter_map(|token| self.tokens.ids(token))
            .flatten()
            .collect()
    }

    /// Distinct keys across both structures.
    pub fn key_count(&self) -> usize {
        self.ngrams.key_count() + self.tokens.key_count()
    }

    /// Number of keys across both structures still listing `id`.
    pub fn occurrences(&self, id: &str) -> usize {
        self.ngrams.occurrences(id) + self.tokens.occurrences(id)
    }

    /// Whether `token` is currently a key of the token index.
    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }
}

impl ContactIndex for HybridIndex {
    fn kind(&self) -> EngineKind {
        EngineKind::Hybrid
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
        let grams = self.ngram_matches(&query.to_lowercase());
        let tokens = self.token_matches(query);
        trace!(
            ngram_hits = ?grams.as_ref().map(HashSet::len),
            token_hits = tokens.len(),
            "hybrid lookup"
        );
        self.records.resolve(combine(grams, tokens))
    }

    fn update(&self, updates: Vec<ContactUpdate>) -> Vec<ContactCard> {
        updates
            .into_iter()
            .filter_map(|update| {
                let updated = self.records.modify(update.id.as_str(), |stored| {
                    self.unindex_card(&**stored);
                    let mut card = (**stored).clone();
                    card.overwrite(&update);
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
            if let Some(card) = self.records.remove(id.as_str()) {
                self.unindex_card(&card);
                deleted += 1;
            }
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
