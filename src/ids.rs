//! Contact id generation.

use crate::domain::ContactId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of globally unique, opaque contact ids.
pub trait IdGenerator: Send + Sync {
    /// Produce an id that has never been handed out before.
    fn generate(&self) -> ContactId;
}

/// Random v4 UUIDs, the production id source.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> ContactId {
        ContactId::new(uuid::Uuid::new_v4().to_string())
            .expect("a formatted UUID is never empty")
    }
}

/// Monotonic ids with a fixed prefix (`c-1`, `c-2`, ...).
///
/// Deterministic, which makes it handy for tests and benchmarks.
#[derive(Debug)]
pub struct SequentialGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialGenerator {
    fn default() -> Self {
        Self::new("c-")
    }
}

impl IdGenerator for SequentialGenerator {
    fn generate(&self) -> ContactId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        ContactId::new(format!("{}{}", self.prefix, n))
            .expect("a numbered id is never empty")
    }
}
