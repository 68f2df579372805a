//! Concurrent inverted index: search key → posting set.
//!
//! Each key owns a small map from contact id to a posting value. Engines that
//! only need id membership use `()` as the value; the k-gram engine stores the
//! shared record reference itself.
//!
//! All mutation of a posting set happens under the shard lock of its key, so a
//! removal that empties a set prunes the key in the same critical section. An
//! addition racing with that removal either lands before it (and the set is not
//! empty) or re-creates the key afterwards; it is never lost.

use crate::domain::ContactId;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

pub struct PostingIndex<V> {
    postings: DashMap<String, HashMap<ContactId, V>>,
}

impl<V: Clone> PostingIndex<V> {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            postings: DashMap::new(),
        }
    }

    /// Add `id` to the posting set of `key`, replacing any previous value.
    pub fn add(&self, key: &str, id: &ContactId, value: V) {
        if let Some(mut set) = self.postings.get_mut(key) {
            set.insert(id.clone(), value);
            return;
        }
        self.postings
            .entry(key.to_string())
            .or_default()
            .insert(id.clone(), value);
    }

    /// Remove `id` from the posting set of `key`.
    ///
    /// The key is dropped when its set becomes empty. Returns whether `id`
    /// was present.
    pub fn remove(&self, key: &str, id: &ContactId) -> bool {
        let mut removed = false;
        self.postings.remove_if_mut(key, |_, set| {
            removed = set.remove(id).is_some();
            set.is_empty()
        });
        removed
    }

    /// Ids posted under `key`, or `None` when the key is unknown.
    pub fn ids(&self, key: &str) -> Option<HashSet<ContactId>> {
        self.postings
            .get(key)
            .filter(|set| !set.is_empty())
            .map(|set| set.keys().cloned().collect())
    }

    /// Posting values stored under `key`.
    pub fn values(&self, key: &str) -> Vec<V> {
        self.postings
            .get(key)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.postings.contains_key(key)
    }

    /// Number of distinct keys currently indexed.
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of keys whose posting set holds `id`.
    ///
    /// Scans the whole index; meant for diagnostics and tests.
    pub fn occurrences(&self, id: &str) -> usize {
        self.postings
            .iter()
            .filter(|entry| entry.value().contains_key(id))
            .count()
    }
}

impl<V: Clone> Default for PostingIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}
