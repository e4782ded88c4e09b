//! Complaint domain service.
//!
//! Implements the complaint driving ports over a [`ComplaintRepository`].
//! Input is validated before the repository is touched, and the service keeps
//! no state between calls.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{
    ComplaintPayload, ComplaintRepository, ComplaintRepositoryError, ComplaintsCommand,
    ComplaintsQuery, CreateComplaintRequest, CreateComplaintResponse, DeleteComplaintRequest,
    DeleteComplaintResponse, GetComplaintRequest, GetComplaintResponse, ListComplaintsResponse,
    UpdateComplaintRequest, UpdateComplaintResponse, parse_update_request,
};
use crate::domain::{
    COMPLAINT_NOT_FOUND, Complaint, ComplaintId, ComplaintValidationErrors, Error,
};

fn map_repository_error(err: ComplaintRepositoryError) -> Error {
    error!(error = %err, "complaint repository failure");
    match err {
        ComplaintRepositoryError::Connection { message } => {
            Error::internal(format!("complaint repository unavailable: {message}"))
        }
        ComplaintRepositoryError::Query { message } => {
            Error::internal(format!("complaint repository error: {message}"))
        }
    }
}

fn parse_id(raw: &str) -> Result<ComplaintId, Error> {
    ComplaintId::parse(raw).map_err(|err| Error::from(ComplaintValidationErrors::from(err)))
}

/// Complaint service implementing the command and query driving ports.
#[derive(Clone)]
pub struct ComplaintService<R> {
    complaint_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ComplaintService<R> {
    /// Create a new service over the complaint repository.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use complaints::domain::ComplaintService;
    /// # use complaints::domain::ports::FixtureComplaintRepository;
    /// let service = ComplaintService::new(
    ///     Arc::new(FixtureComplaintRepository),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(complaint_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            complaint_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> ComplaintsCommand for ComplaintService<R>
where
    R: ComplaintRepository,
{
    async fn create_complaint(
        &self,
        request: CreateComplaintRequest,
    ) -> Result<CreateComplaintResponse, Error> {
        let draft = request.fields.to_draft()?;
        let complaint = Complaint::create(ComplaintId::random(), draft, self.clock.utc());

        self.complaint_repo
            .insert(&complaint)
            .await
            .map_err(map_repository_error)?;

        info!(complaint_id = %complaint.id(), priority = %complaint.priority(), "complaint created");
        Ok(CreateComplaintResponse {
            complaint: ComplaintPayload::from(complaint),
        })
    }

    async fn update_complaint(
        &self,
        request: UpdateComplaintRequest,
    ) -> Result<UpdateComplaintResponse, Error> {
        let (id, draft) = parse_update_request(&request)?;

        let complaint = self
            .complaint_repo
            .update(&id, &draft, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(COMPLAINT_NOT_FOUND))?;

        info!(complaint_id = %id, "complaint updated");
        Ok(UpdateComplaintResponse {
            complaint: ComplaintPayload::from(complaint),
        })
    }

    async fn delete_complaint(
        &self,
        request: DeleteComplaintRequest,
    ) -> Result<DeleteComplaintResponse, Error> {
        let id = parse_id(&request.id)?;

        let deleted = self
            .complaint_repo
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(COMPLAINT_NOT_FOUND));
        }

        info!(complaint_id = %id, "complaint deleted");
        Ok(DeleteComplaintResponse { id })
    }
}

#[async_trait]
impl<R> ComplaintsQuery for ComplaintService<R>
where
    R: ComplaintRepository,
{
    async fn list_complaints(&self) -> Result<ListComplaintsResponse, Error> {
        let complaints = self
            .complaint_repo
            .list_newest_first()
            .await
            .map_err(map_repository_error)?;

        debug!(count = complaints.len(), "listed complaints");
        Ok(ListComplaintsResponse {
            complaints: complaints.into_iter().map(ComplaintPayload::from).collect(),
        })
    }

    async fn get_complaint(
        &self,
        request: GetComplaintRequest,
    ) -> Result<GetComplaintResponse, Error> {
        let id = parse_id(&request.id)?;

        let complaint = self
            .complaint_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(COMPLAINT_NOT_FOUND))?;

        Ok(GetComplaintResponse {
            complaint: ComplaintPayload::from(complaint),
        })
    }
}

#[cfg(test)]
#[path = "complaint_service_tests.rs"]
mod tests;
