//! Driving port for complaint mutations.
//!
//! Requests carry raw client values. Implementations validate them before
//! touching storage and report every violated rule in one error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{
    COMPLAINT_NOT_FOUND, Complaint, ComplaintDraft, ComplaintId, ComplaintValidationError,
    ComplaintValidationErrors, Error, Priority,
};

/// Serializable complaint record returned by driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintPayload {
    pub id: ComplaintId,
    pub user_name: String,
    pub issue: String,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintPayload {
    fn from(value: Complaint) -> Self {
        Self {
            id: value.id(),
            user_name: value.user_name().as_ref().to_owned(),
            issue: value.issue().as_ref().to_owned(),
            priority: value.priority(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Priority as the client sent it.
///
/// An omitted field defaults to [`Priority::Low`]; an explicit `null` counts
/// as provided and is rejected like any other value outside the allowed set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PriorityInput {
    /// The field was not present.
    #[default]
    Omitted,
    /// The field was present with a JSON `null`.
    Null,
    /// The field carried a string.
    Value(String),
}

impl PriorityInput {
    /// Shorthand for a client-supplied string.
    pub fn value(raw: impl Into<String>) -> Self {
        Self::Value(raw.into())
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    /// Resolve to a domain priority.
    ///
    /// # Examples
    /// ```
    /// use complaints::domain::Priority;
    /// use complaints::domain::ports::PriorityInput;
    ///
    /// assert_eq!(PriorityInput::Omitted.resolve(), Ok(Priority::Low));
    /// assert_eq!(PriorityInput::value("High").resolve(), Ok(Priority::High));
    /// assert!(PriorityInput::Null.resolve().is_err());
    /// ```
    pub fn resolve(&self) -> Result<Priority, ComplaintValidationError> {
        match self {
            Self::Omitted => Priority::from_optional(None),
            Self::Null => Err(ComplaintValidationError::InvalidPriority),
            Self::Value(raw) => Priority::from_optional(Some(raw.as_str())),
        }
    }
}

impl Serialize for PriorityInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Omitted | Self::Null => serializer.serialize_none(),
            Self::Value(raw) => serializer.serialize_str(raw),
        }
    }
}

// Only runs when the key is present; `#[serde(default)]` covers omission.
impl<'de> Deserialize<'de> for PriorityInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map_or(Self::Null, Self::Value))
    }
}

/// Mutable complaint fields exactly as the client sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintFieldsInput {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "PriorityInput::is_omitted")]
    pub priority: PriorityInput,
}

impl ComplaintFieldsInput {
    /// Validate every field, collecting all failures.
    pub fn to_draft(&self) -> Result<ComplaintDraft, ComplaintValidationErrors> {
        ComplaintDraft::with_resolved_priority(
            self.user_name.as_deref(),
            self.issue.as_deref(),
            self.priority.resolve(),
        )
    }
}

/// Request to create a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    pub fields: ComplaintFieldsInput,
}

/// Response from creating a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintResponse {
    pub complaint: ComplaintPayload,
}

/// Request to replace the mutable fields of a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintRequest {
    /// Identifier as it appeared in the request path.
    pub id: String,
    pub fields: ComplaintFieldsInput,
}

/// Response from updating a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintResponse {
    pub complaint: ComplaintPayload,
}

/// Request to delete a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteComplaintRequest {
    /// Identifier as it appeared in the request path.
    pub id: String,
}

/// Acknowledgement that a complaint was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteComplaintResponse {
    pub id: ComplaintId,
}

/// Validate an update request, reporting a bad id alongside any field errors.
pub(crate) fn parse_update_request(
    request: &UpdateComplaintRequest,
) -> Result<(ComplaintId, ComplaintDraft), ComplaintValidationErrors> {
    match (ComplaintId::parse(&request.id), request.fields.to_draft()) {
        (Ok(id), Ok(draft)) => Ok((id, draft)),
        (Err(id_error), Ok(_)) => Err(id_error.into()),
        (Ok(_), Err(field_errors)) => Err(field_errors),
        (Err(id_error), Err(field_errors)) => Err(field_errors.preceded_by(id_error)),
    }
}

/// Driving port for complaint write operations.
///
/// # Examples
///
/// ```rust,no_run
/// # use complaints::domain::ports::{
/// #     ComplaintFieldsInput, ComplaintsCommand, CreateComplaintRequest,
/// #     FixtureComplaintsCommand, PriorityInput,
/// # };
/// # async fn example() -> Result<(), complaints::domain::Error> {
/// let command = FixtureComplaintsCommand;
/// let response = command
///     .create_complaint(CreateComplaintRequest {
///         fields: ComplaintFieldsInput {
///             user_name: Some("Ada".to_owned()),
///             issue: Some("Printer jammed".to_owned()),
///             priority: PriorityInput::Omitted,
///         },
///     })
///     .await?;
/// assert_eq!(response.complaint.user_name, "Ada");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintsCommand: Send + Sync {
    /// Validates and stores a new complaint.
    ///
    /// The service allocates the identifier and both timestamps. Callers
    /// should handle `Result::Err(Error)` for validation and persistence
    /// failures at the boundary layer.
    async fn create_complaint(
        &self,
        request: CreateComplaintRequest,
    ) -> Result<CreateComplaintResponse, Error>;

    /// Replaces `userName`, `issue`, and `priority` on an existing complaint.
    async fn update_complaint(
        &self,
        request: UpdateComplaintRequest,
    ) -> Result<UpdateComplaintResponse, Error>;

    /// Hard-deletes a complaint.
    async fn delete_complaint(
        &self,
        request: DeleteComplaintRequest,
    ) -> Result<DeleteComplaintResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Creation echoes the validated input; updates and deletes behave as if the
/// store were empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureComplaintsCommand;

#[async_trait]
impl ComplaintsCommand for FixtureComplaintsCommand {
    async fn create_complaint(
        &self,
        request: CreateComplaintRequest,
    ) -> Result<CreateComplaintResponse, Error> {
        let draft = request.fields.to_draft()?;
        let complaint = Complaint::create(ComplaintId::random(), draft, Utc::now());
        Ok(CreateComplaintResponse {
            complaint: complaint.into(),
        })
    }

    async fn update_complaint(
        &self,
        request: UpdateComplaintRequest,
    ) -> Result<UpdateComplaintResponse, Error> {
        parse_update_request(&request)?;
        Err(Error::not_found(COMPLAINT_NOT_FOUND))
    }

    async fn delete_complaint(
        &self,
        request: DeleteComplaintRequest,
    ) -> Result<DeleteComplaintResponse, Error> {
        ComplaintId::parse(&request.id).map_err(ComplaintValidationErrors::from)?;
        Err(Error::not_found(COMPLAINT_NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{ComplaintField, ErrorCode};

    #[fixture]
    fn valid_fields() -> ComplaintFieldsInput {
        ComplaintFieldsInput {
            user_name: Some("Ada".to_owned()),
            issue: Some("Printer jammed".to_owned()),
            priority: PriorityInput::value("High"),
        }
    }

    #[rstest]
    fn omitted_priority_defaults_to_low() {
        let input: ComplaintFieldsInput =
            serde_json::from_str(r#"{"userName":"Ada","issue":"Printer jammed"}"#)
                .expect("valid JSON");

        assert_eq!(input.priority, PriorityInput::Omitted);
        let draft = input.to_draft().expect("valid draft");
        assert_eq!(draft.priority(), Priority::Low);
    }

    #[rstest]
    fn null_priority_is_rejected_with_other_field_errors() {
        let input: ComplaintFieldsInput =
            serde_json::from_str(r#"{"userName":" ","issue":"Printer jammed","priority":null}"#)
                .expect("valid JSON");

        assert_eq!(input.priority, PriorityInput::Null);
        let errors = input.to_draft().expect_err("null priority rejected");
        let rejected: Vec<_> = errors.iter().copied().collect();
        assert_eq!(
            rejected,
            vec![
                ComplaintValidationError::MissingUserName,
                ComplaintValidationError::InvalidPriority,
            ]
        );
    }

    #[rstest]
    fn omitted_priority_is_not_serialized() {
        let json = serde_json::to_value(ComplaintFieldsInput::default()).expect("serializes");

        assert!(json.get("priority").is_none());
    }

    #[rstest]
    fn update_parsing_reports_id_and_field_errors_together() {
        let request = UpdateComplaintRequest {
            id: "abc".to_owned(),
            fields: ComplaintFieldsInput::default(),
        };

        let errors = parse_update_request(&request).expect_err("invalid request");

        assert!(errors.mentions(ComplaintField::Id));
        assert!(errors.mentions(ComplaintField::UserName));
        assert!(errors.mentions(ComplaintField::Issue));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_echoes_trimmed_fields(valid_fields: ComplaintFieldsInput) {
        let response = FixtureComplaintsCommand
            .create_complaint(CreateComplaintRequest {
                fields: valid_fields,
            })
            .await
            .expect("fixture create succeeds");

        assert_eq!(response.complaint.user_name, "Ada");
        assert_eq!(response.complaint.priority, Priority::High);
        assert_eq!(
            response.complaint.created_at,
            response.complaint.updated_at
        );
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_delete_rejects_malformed_id() {
        let error = FixtureComplaintsCommand
            .delete_complaint(DeleteComplaintRequest {
                id: "abc".to_owned(),
            })
            .await
            .expect_err("malformed id");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_update_reports_not_found(valid_fields: ComplaintFieldsInput) {
        let error = FixtureComplaintsCommand
            .update_complaint(UpdateComplaintRequest {
                id: ComplaintId::random().to_string(),
                fields: valid_fields,
            })
            .await
            .expect_err("empty store");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), COMPLAINT_NOT_FOUND);
    }
}
