//! Outbound adapters implementing the complaint repository port.
//!
//! - **memory**: process-local store for development and tests
//! - **persistence**: PostgreSQL via Diesel
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod memory;
pub mod persistence;
