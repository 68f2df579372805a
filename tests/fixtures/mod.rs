//! Shared fixtures for integration tests.
//!
//! Engines are built with a sequential id generator so failures are easy to
//! read, and sample contacts cover the common name/email/phone shapes.

use address_book_index::ids::SequentialGenerator;
use address_book_index::index::{build_index, ContactIndex, EngineKind};
use address_book_index::NewContact;
use std::sync::Arc;

/// Build a fresh engine of the given kind.
pub fn engine(kind: EngineKind) -> Arc<dyn ContactIndex> {
    build_index(kind, Arc::new(SequentialGenerator::default()))
}

/// The contact used by the directory walkthrough scenario.
#[allow(dead_code)]
pub fn john_smith() -> NewContact {
    NewContact::new("John Smith", "john@acme.com", "5551234")
}

/// A contact with the exact values used in the field-isolation checks.
#[allow(dead_code)]
pub fn ann() -> NewContact {
    NewContact::new("Ann", "a@b.com", "123")
}

/// A handful of unrelated contacts.
#[allow(dead_code)]
pub fn sample_directory() -> Vec<NewContact> {
    vec![
        john_smith(),
        NewContact::new("Jane Doe", "jane.doe@example.org", "4155550100"),
        NewContact::new("Carlos Mendez", "cmendez@corp.io", "2125550199"),
        NewContact::new("Priya Natarajan", "priya_n@uni.edu", "6175550123"),
    ]
}
