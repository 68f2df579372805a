//! Address book service layer.
//!
//! The single entry point for callers: validates requests, delegates to the
//! active index engine and records metrics.

use crate::domain::ContactId;
use crate::error::{DirectoryError, DirectoryResult};
use crate::index::{ContactIndex, EngineKind};
use crate::models::{ContactCard, ContactUpdate, DeletedResponse, NewContact};
use crate::observability::{MetricsTracker, Timer};
use std::sync::Arc;

/// Address book operations exposed to the transport layer.
pub trait AddressBookService: Send + Sync {
    /// Create contacts; each gets a freshly generated id.
    fn insert_contacts(&self, contacts: Vec<NewContact>) -> DirectoryResult<Vec<ContactCard>>;

    /// Find contacts matching `query`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the query is empty or longer than the configured limit.
    fn search(&self, query: &str) -> DirectoryResult<Vec<ContactCard>>;

    /// Update existing contacts. Unknown ids are skipped.
    fn update_contacts(&self, updates: Vec<ContactUpdate>) -> DirectoryResult<Vec<ContactCard>>;

    /// Delete contacts by id, reporting how many existed.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `ids` is empty, `Validation` if any id is empty.
    fn delete_contacts(&self, ids: Vec<String>) -> DirectoryResult<DeletedResponse>;

    /// The engine backing this service.
    fn engine(&self) -> EngineKind;
}

/// Default implementation of AddressBookService.
pub struct AddressBookServiceImpl {
    index: Arc<dyn ContactIndex>,
    metrics: MetricsTracker,
    max_query_length: usize,
}

impl AddressBookServiceImpl {
    /// Create a new service over `index`.
    pub fn new(index: Arc<dyn ContactIndex>, max_query_length: usize) -> Self {
        Self {
            index,
            metrics: MetricsTracker::new(),
            max_query_length,
        }
    }

    /// Operation counters for this service.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    fn reject(&self, operation: &str, reason: impl Into<String>) -> DirectoryError {
        let reason = reason.into();
        self.metrics.track_rejected(operation, &reason);
        DirectoryError::InvalidArgument(reason)
    }

    /// Validate search query.
    fn validate_search_query(&self, query: &str) -> DirectoryResult<()> {
        if query.is_empty() {
            return Err(self.reject("search", "Search query cannot be empty"));
        }
        if query.chars().count() > self.max_query_length {
            return Err(self.reject(
                "search",
                format!(
                    "Search query too long (max {} characters)",
                    self.max_query_length
                ),
            ));
        }
        Ok(())
    }
}

impl AddressBookService for AddressBookServiceImpl {
    fn insert_contacts(&self, contacts: Vec<NewContact>) -> DirectoryResult<Vec<ContactCard>> {
        let timer = Timer::new("insert");
        let created = self.index.insert(contacts);
        self.metrics.track_insert(timer.finish(), created.len());
        Ok(created)
    }

    fn search(&self, query: &str) -> DirectoryResult<Vec<ContactCard>> {
        self.validate_search_query(query)?;

        let timer = Timer::new("search");
        let results = self.index.find(query);
        self.metrics.track_search_query(timer.finish(), results.len());
        Ok(results)
    }

    fn update_contacts(&self, updates: Vec<ContactUpdate>) -> DirectoryResult<Vec<ContactCard>> {
        let requested = updates.len();
        let timer = Timer::new("update");
        let updated = self.index.update(updates);
        self.metrics
            .track_update(timer.finish(), requested, updated.len());
        Ok(updated)
    }

    fn delete_contacts(&self, ids: Vec<String>) -> DirectoryResult<DeletedResponse> {
        if ids.is_empty() {
            return Err(self.reject(
                "delete",
                "List of IDs to delete cannot be null or empty",
            ));
        }
        let ids = ids
            .into_iter()
            .map(ContactId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                self.metrics.track_rejected("delete", &e.to_string());
                DirectoryError::from(e)
            })?;

        let timer = Timer::new("delete");
        let deleted = self.index.delete(&ids);
        self.metrics.track_delete(timer.finish(), ids.len(), deleted);
        Ok(DeletedResponse { deleted })
    }

    fn engine(&self) -> EngineKind {
        self.index.kind()
    }
}
