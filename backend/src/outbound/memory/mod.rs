//! Process-local complaint store.
//!
//! Used when no database URL is configured and by handler tests. Data lives
//! only as long as the process.

mod complaint_repository;

pub use complaint_repository::InMemoryComplaintRepository;
