//! Domain primitives, services, and ports.
//!
//! Purpose: define the complaint entity, its validation rules, and the
//! services that apply them. Nothing here depends on HTTP or on a concrete
//! store; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Complaint and its value types: the sole entity.
//! - ComplaintService: implements the complaint driving ports.
//! - TraceId: request-scoped correlation identifier.

pub mod complaint;
pub mod complaint_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::complaint::{
    COMPLAINT_NOT_FOUND, COMPLAINT_VALIDATION_FAILED, Complaint, ComplaintDraft, ComplaintField,
    ComplaintId, ComplaintValidationError, ComplaintValidationErrors, IssueText, Priority,
    UserName, refreshed_timestamp, storage_timestamp,
};
pub use self::complaint_service::ComplaintService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
