//! Driving port for complaint read operations.
//!
//! Inbound adapters use this port to read stored complaints without depending
//! on repository details.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{COMPLAINT_NOT_FOUND, ComplaintId, ComplaintValidationErrors, Error};

use super::complaints_command::ComplaintPayload;

/// Request to fetch one complaint by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetComplaintRequest {
    /// Identifier as it appeared in the request path.
    pub id: String,
}

/// Response for a single complaint lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetComplaintResponse {
    pub complaint: ComplaintPayload,
}

/// Response containing every stored complaint, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComplaintsResponse {
    pub complaints: Vec<ComplaintPayload>,
}

/// Driving port for complaint read operations.
///
/// # Examples
///
/// ```rust,no_run
/// # use complaints::domain::ports::{ComplaintsQuery, FixtureComplaintsQuery};
/// # async fn example() -> Result<(), complaints::domain::Error> {
/// let query = FixtureComplaintsQuery;
/// let response = query.list_complaints().await?;
/// assert!(response.complaints.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintsQuery: Send + Sync {
    /// Lists every complaint, most recently created first.
    async fn list_complaints(&self) -> Result<ListComplaintsResponse, Error>;

    /// Fetches one complaint by identifier.
    ///
    /// A malformed identifier is rejected before any store access.
    async fn get_complaint(
        &self,
        request: GetComplaintRequest,
    ) -> Result<GetComplaintResponse, Error>;
}

/// Fixture query implementation backed by an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureComplaintsQuery;

#[async_trait]
impl ComplaintsQuery for FixtureComplaintsQuery {
    async fn list_complaints(&self) -> Result<ListComplaintsResponse, Error> {
        Ok(ListComplaintsResponse {
            complaints: Vec::new(),
        })
    }

    async fn get_complaint(
        &self,
        request: GetComplaintRequest,
    ) -> Result<GetComplaintResponse, Error> {
        ComplaintId::parse(&request.id).map_err(ComplaintValidationErrors::from)?;
        Err(Error::not_found(COMPLAINT_NOT_FOUND))
    }
}
