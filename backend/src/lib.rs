//! Complaint tracking service: domain model, ports, and adapters.
//!
//! The binary in `main.rs` wires these together; this library keeps every
//! layer testable on its own.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
