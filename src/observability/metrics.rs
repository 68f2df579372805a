//! Directory operation metrics.
//!
//! Counters are plain atomics shared through `Arc`, so a cloned tracker reports
//! into the same totals. Each tracked operation also emits a tracing event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics tracker for the address book service.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    contacts_inserted_total: Arc<AtomicU64>,
    contacts_updated_total: Arc<AtomicU64>,
    contacts_deleted_total: Arc<AtomicU64>,
    search_queries_total: Arc<AtomicU64>,
    search_results_total: Arc<AtomicU64>,
    rejected_requests_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            contacts_inserted_total: Arc::new(AtomicU64::new(0)),
            contacts_updated_total: Arc::new(AtomicU64::new(0)),
            contacts_deleted_total: Arc::new(AtomicU64::new(0)),
            search_queries_total: Arc::new(AtomicU64::new(0)),
            search_results_total: Arc::new(AtomicU64::new(0)),
            rejected_requests_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a batch insert.
    pub fn track_insert(&self, duration_ms: u128, inserted: usize) {
        self.contacts_inserted_total
            .fetch_add(inserted as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            inserted = inserted,
            "Contacts inserted"
        );
    }

    /// Track a batch update. `requested` counts the payloads, `updated` the
    /// contacts that actually existed.
    pub fn track_update(&self, duration_ms: u128, requested: usize, updated: usize) {
        self.contacts_updated_total
            .fetch_add(updated as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            requested = requested,
            updated = updated,
            "Contacts updated"
        );
    }

    /// Track a batch delete.
    pub fn track_delete(&self, duration_ms: u128, requested: usize, deleted: usize) {
        self.contacts_deleted_total
            .fetch_add(deleted as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            requested = requested,
            deleted = deleted,
            "Contacts deleted"
        );
    }

    /// Track a search query.
    pub fn track_search_query(&self, duration_ms: u128, result_count: usize) {
        self.search_queries_total.fetch_add(1, Ordering::Relaxed);
        self.search_results_total
            .fetch_add(result_count as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Search query completed"
        );
    }

    /// Track a request refused because of caller input.
    pub fn track_rejected(&self, operation: &str, reason: &str) {
        self.rejected_requests_total.fetch_add(1, Ordering::Relaxed);

        tracing::warn!(operation = %operation, reason = %reason, "Request rejected");
    }

    pub fn contacts_inserted_total(&self) -> u64 {
        self.contacts_inserted_total.load(Ordering::Relaxed)
    }

    pub fn contacts_updated_total(&self) -> u64 {
        self.contacts_updated_total.load(Ordering::Relaxed)
    }

    pub fn contacts_deleted_total(&self) -> u64 {
        self.contacts_deleted_total.load(Ordering::Relaxed)
    }

    pub fn search_queries_total(&self) -> u64 {
        self.search_queries_total.load(Ordering::Relaxed)
    }

    pub fn rejected_requests_total(&self) -> u64 {
        self.rejected_requests_total.load(Ordering::Relaxed)
    }

    /// Average number of contacts returned per search.
    pub fn avg_results_per_search(&self) -> f64 {
        let queries = self.search_queries_total() as f64;
        let results = self.search_results_total.load(Ordering::Relaxed) as f64;

        if queries == 0.0 {
            0.0
        } else {
            results / queries
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Contacts Inserted: {}\n\
             Contacts Updated: {}\n\
             Contacts Deleted: {}\n\
             Search Queries: {} ({:.2} results avg)\n\
             Rejected Requests: {}",
            self.contacts_inserted_total(),
            self.contacts_updated_total(),
            self.contacts_deleted_total(),
            self.search_queries_total(),
            self.avg_results_per_search(),
            self.rejected_requests_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_tracker_creation() {
        let tracker = MetricsTracker::new();
        assert_eq!(tracker.contacts_inserted_total(), 0);
        assert_eq!(tracker.contacts_updated_total(), 0);
        assert_eq!(tracker.contacts_deleted_total(), 0);
        assert_eq!(tracker.search_queries_total(), 0);
        assert_eq!(tracker.rejected_requests_total(), 0);
    }

    #[test]
    fn test_track_mutations() {
        let tracker = MetricsTracker::new();

        tracker.track_insert(1, 3);
        tracker.track_update(1, 2, 1);
        tracker.track_delete(1, 4, 2);

        assert_eq!(tracker.contacts_inserted_total(), 3);
        assert_eq!(tracker.contacts_updated_total(), 1);
        assert_eq!(tracker.contacts_deleted_total(), 2);
    }

    #[test]
    fn test_avg_results_per_search() {
        let tracker = MetricsTracker::new();
        assert_eq!(tracker.avg_results_per_search(), 0.0);

        tracker.track_search_query(1, 4);
        tracker.track_search_query(1, 0);
        assert!((tracker.avg_results_per_search() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clones_share_counters() {
        let tracker = MetricsTracker::new();
        let clone = tracker.clone();

        clone.track_rejected("delete", "empty id list");
        assert_eq!(tracker.rejected_requests_total(), 1);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(10));
        let duration = timer.finish();
        assert!(duration >= 10);
    }

    #[test]
    fn test_summary() {
        let tracker = MetricsTracker::new();
        tracker.track_insert(1, 1);
        tracker.track_search_query(1, 1);

        let summary = tracker.summary();
        assert!(summary.contains("Contacts Inserted: 1"));
        assert!(summary.contains("Search Queries: 1"));
    }
}
