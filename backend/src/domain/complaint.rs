//! Complaint data model.
//!
//! A complaint records who raised an issue, what the issue is, and how urgent
//! it is. Values are validated on construction so an invalid complaint cannot
//! be represented once it reaches the service or the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Message returned when a well-formed identifier has no stored complaint.
pub const COMPLAINT_NOT_FOUND: &str = "Complaint not found";

/// Top-level message for rejected complaint input.
pub const COMPLAINT_VALIDATION_FAILED: &str = "complaint validation failed";

/// Timestamps are persisted with microsecond precision.
const TIMESTAMP_PRECISION_DIGITS: u16 = 6;

/// Request field a validation failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplaintField {
    /// The path identifier.
    Id,
    /// Submitter display name.
    UserName,
    /// Issue description.
    Issue,
    /// Urgency level.
    Priority,
    /// Last modification time of a stored record.
    UpdatedAt,
}

impl ComplaintField {
    /// Wire name of the field as clients send it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserName => "userName",
            Self::Issue => "issue",
            Self::Priority => "priority",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

impl fmt::Display for ComplaintField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule a complaint input failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintValidationError {
    /// The identifier is not a canonical UUID.
    InvalidId,
    /// `userName` is missing or blank.
    MissingUserName,
    /// `issue` is missing or blank.
    MissingIssue,
    /// `priority` was provided but is not `Low`, `Medium`, or `High`.
    InvalidPriority,
    /// A stored record has `updatedAt` earlier than `createdAt`.
    UpdatedBeforeCreated,
}

impl ComplaintValidationError {
    /// Field the failure belongs to.
    pub fn field(self) -> ComplaintField {
        match self {
            Self::InvalidId => ComplaintField::Id,
            Self::MissingUserName => ComplaintField::UserName,
            Self::MissingIssue => ComplaintField::Issue,
            Self::InvalidPriority => ComplaintField::Priority,
            Self::UpdatedBeforeCreated => ComplaintField::UpdatedAt,
        }
    }

    /// Stable machine-readable code for the failed rule.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::MissingUserName | Self::MissingIssue => "required",
            Self::InvalidPriority => "invalid_priority",
            Self::UpdatedBeforeCreated => "timestamp_order",
        }
    }
}

impl fmt::Display for ComplaintValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "Invalid ID"),
            Self::MissingUserName => write!(f, "userName is required"),
            Self::MissingIssue => write!(f, "issue is required"),
            Self::InvalidPriority => write!(f, "priority must be Low, Medium, or High"),
            Self::UpdatedBeforeCreated => write!(f, "updatedAt must not precede createdAt"),
        }
    }
}

impl std::error::Error for ComplaintValidationError {}

/// Every rule a single complaint request violated, in field order.
///
/// The collection is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintValidationErrors(Vec<ComplaintValidationError>);

impl ComplaintValidationErrors {
    /// Wrap a list of failures, returning `None` when nothing failed.
    pub fn from_vec(errors: Vec<ComplaintValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Put `error` ahead of the failures already recorded.
    pub fn preceded_by(mut self, error: ComplaintValidationError) -> Self {
        self.0.insert(0, error);
        self
    }

    /// Iterate over the recorded failures.
    pub fn iter(&self) -> impl Iterator<Item = &ComplaintValidationError> {
        self.0.iter()
    }

    /// Returns true when a failure is recorded against `field`.
    pub fn mentions(&self, field: ComplaintField) -> bool {
        self.0.iter().any(|error| error.field() == field)
    }
}

impl From<ComplaintValidationError> for ComplaintValidationErrors {
    fn from(value: ComplaintValidationError) -> Self {
        Self(vec![value])
    }
}

impl IntoIterator for ComplaintValidationErrors {
    type Item = ComplaintValidationError;
    type IntoIter = std::vec::IntoIter<ComplaintValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ComplaintValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ComplaintValidationErrors {}

impl From<ComplaintValidationErrors> for Error {
    fn from(value: ComplaintValidationErrors) -> Self {
        let errors: Vec<_> = value
            .iter()
            .map(|error| {
                json!({
                    "field": error.field().as_str(),
                    "code": error.code(),
                    "message": error.to_string(),
                })
            })
            .collect();
        Error::invalid_request(COMPLAINT_VALIDATION_FAILED).with_details(json!({ "errors": errors }))
    }
}

/// Stable complaint identifier stored as a UUID.
///
/// # Examples
/// ```
/// use complaints::domain::ComplaintId;
///
/// let id = ComplaintId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(ComplaintId::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(Uuid);

impl ComplaintId {
    /// Allocate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, for example one read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a client-supplied identifier.
    ///
    /// Accepts the hyphenated and simple UUID forms only. Surrounding
    /// whitespace, braces, and URN prefixes are rejected.
    pub fn parse(raw: &str) -> Result<Self, ComplaintValidationError> {
        const HYPHENATED_LEN: usize = 36;
        const SIMPLE_LEN: usize = 32;

        if raw.len() != HYPHENATED_LEN && raw.len() != SIMPLE_LEN {
            return Err(ComplaintValidationError::InvalidId);
        }
        Uuid::try_parse(raw)
            .map(Self)
            .map_err(|_| ComplaintValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ComplaintId {
    type Err = ComplaintValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Urgency of a complaint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Default when the client omits a priority.
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Canonical spelling, shared by the wire format and the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Resolve an optional client value. Absence means [`Priority::Low`].
    ///
    /// # Examples
    /// ```
    /// use complaints::domain::Priority;
    ///
    /// assert_eq!(Priority::from_optional(None), Ok(Priority::Low));
    /// assert_eq!(Priority::from_optional(Some("High")), Ok(Priority::High));
    /// assert!(Priority::from_optional(Some("")).is_err());
    /// ```
    pub fn from_optional(raw: Option<&str>) -> Result<Self, ComplaintValidationError> {
        raw.map_or(Ok(Self::default()), str::parse::<Self>)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ComplaintValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(ComplaintValidationError::InvalidPriority),
        }
    }
}

fn trimmed_non_empty(
    raw: Option<&str>,
    missing: ComplaintValidationError,
) -> Result<String, ComplaintValidationError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_owned()),
        _ => Err(missing),
    }
}

/// Name of the person who raised the complaint, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Trim and validate a submitter name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ComplaintValidationError> {
        trimmed_non_empty(Some(raw.as_ref()), ComplaintValidationError::MissingUserName).map(Self)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Free-form description of the complaint, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueText(String);

impl IssueText {
    /// Trim and validate an issue description.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ComplaintValidationError> {
        trimmed_non_empty(Some(raw.as_ref()), ComplaintValidationError::MissingIssue).map(Self)
    }
}

impl AsRef<str> for IssueText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<IssueText> for String {
    fn from(value: IssueText) -> Self {
        value.0
    }
}

/// Validated mutable fields of a complaint.
///
/// Shared by create and update, which apply the same field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDraft {
    user_name: UserName,
    issue: IssueText,
    priority: Priority,
}

impl ComplaintDraft {
    /// Assemble a draft from already validated parts.
    pub fn new(user_name: UserName, issue: IssueText, priority: Priority) -> Self {
        Self {
            user_name,
            issue,
            priority,
        }
    }

    /// Validate raw client input, reporting every failed rule at once.
    ///
    /// # Examples
    /// ```
    /// use complaints::domain::{ComplaintDraft, ComplaintField};
    ///
    /// let errors = ComplaintDraft::parse(Some(" "), None, Some("Urgent"))
    ///     .expect_err("all three fields are invalid");
    /// assert!(errors.mentions(ComplaintField::UserName));
    /// assert!(errors.mentions(ComplaintField::Issue));
    /// assert!(errors.mentions(ComplaintField::Priority));
    /// ```
    pub fn parse(
        user_name: Option<&str>,
        issue: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Self, ComplaintValidationErrors> {
        Self::with_resolved_priority(user_name, issue, Priority::from_optional(priority))
    }

    /// Validate name and issue alongside a priority the caller already
    /// resolved, so transport-specific priority rules join the same report.
    pub fn with_resolved_priority(
        user_name: Option<&str>,
        issue: Option<&str>,
        priority: Result<Priority, ComplaintValidationError>,
    ) -> Result<Self, ComplaintValidationErrors> {
        let user_name = trimmed_non_empty(user_name, ComplaintValidationError::MissingUserName)
            .map(UserName);
        let issue = trimmed_non_empty(issue, ComplaintValidationError::MissingIssue).map(IssueText);

        match (user_name, issue, priority) {
            (Ok(user_name), Ok(issue), Ok(priority)) => Ok(Self::new(user_name, issue, priority)),
            (user_name, issue, priority) => {
                let errors = [user_name.err(), issue.err(), priority.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                Err(ComplaintValidationErrors(errors))
            }
        }
    }

    /// Validated submitter name.
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Validated issue text.
    pub fn issue(&self) -> &IssueText {
        &self.issue
    }

    /// Resolved priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }
}

/// Truncate to the precision the store keeps so reads compare equal to writes.
pub fn storage_timestamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(TIMESTAMP_PRECISION_DIGITS)
}

/// Next `updatedAt` value for a revision made at `now`.
///
/// The result is always strictly later than `previous`, even when the clock
/// has not advanced past it at storage precision.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use complaints::domain::refreshed_timestamp;
///
/// let previous = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// assert!(refreshed_timestamp(previous, previous) > previous);
/// ```
pub fn refreshed_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let now = storage_timestamp(now);
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// A stored complaint.
///
/// ## Invariants
/// - `created_at <= updated_at`.
/// - `user_name` and `issue` are non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    id: ComplaintId,
    user_name: UserName,
    issue: IssueText,
    priority: Priority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Complaint {
    /// Build a brand new complaint whose timestamps both equal `now`.
    pub fn create(id: ComplaintId, draft: ComplaintDraft, now: DateTime<Utc>) -> Self {
        let now = storage_timestamp(now);
        Self::from_parts(id, draft, now, now)
    }

    /// Rebuild a complaint from stored values.
    pub fn restore(
        id: ComplaintId,
        draft: ComplaintDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ComplaintValidationError> {
        if updated_at < created_at {
            return Err(ComplaintValidationError::UpdatedBeforeCreated);
        }
        Ok(Self::from_parts(id, draft, created_at, updated_at))
    }

    /// Replace the mutable fields, keeping `id` and `created_at`.
    pub fn revise(&self, draft: ComplaintDraft, now: DateTime<Utc>) -> Self {
        Self::from_parts(
            self.id,
            draft,
            self.created_at,
            refreshed_timestamp(self.updated_at, now),
        )
    }

    fn from_parts(
        id: ComplaintId,
        draft: ComplaintDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let ComplaintDraft {
            user_name,
            issue,
            priority,
        } = draft;
        Self {
            id,
            user_name,
            issue,
            priority,
            created_at,
            updated_at,
        }
    }

    /// Identifier allocated at creation.
    pub fn id(&self) -> ComplaintId {
        self.id
    }

    /// Submitter name.
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Issue description.
    pub fn issue(&self) -> &IssueText {
        &self.issue
    }

    /// Current priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Creation time; never changes.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the latest revision, or creation if never revised.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests;
