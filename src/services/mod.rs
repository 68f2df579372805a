//! Application service layer.
//!
//! Services hold the request validation that sits between the transport and
//! the index engines. Engines assume their input has already been checked.

mod address_book_service;

pub use address_book_service::{AddressBookService, AddressBookServiceImpl};
