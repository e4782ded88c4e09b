//! Port for complaint persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Complaint, ComplaintDraft, ComplaintId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by complaint repository adapters.
    pub enum ComplaintRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "complaint repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "complaint repository query failed: {message}",
    }
}

/// Port for storing and reading complaints.
///
/// Adapters own identifier uniqueness and make `update` atomic per record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Persist a newly created complaint.
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError>;

    /// Every complaint, newest `created_at` first with ties broken by id
    /// descending.
    async fn list_newest_first(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError>;

    /// Find a complaint by id.
    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Replace the mutable fields of a stored complaint.
    ///
    /// The read of the current `updated_at` and the write of the revision
    /// happen atomically. Returns `None` when no complaint has this id.
    async fn update(
        &self,
        id: &ComplaintId,
        draft: &ComplaintDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Hard-delete a complaint. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureComplaintRepository;

#[async_trait]
impl ComplaintRepository for FixtureComplaintRepository {
    async fn insert(&self, _complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        Ok(None)
    }

    async fn update(
        &self,
        _id: &ComplaintId,
        _draft: &ComplaintDraft,
        _now: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &ComplaintId) -> Result<bool, ComplaintRepositoryError> {
        Ok(false)
    }
}
