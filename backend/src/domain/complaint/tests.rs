//! Tests for complaint validation and timestamp handling.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
        .single()
        .expect("fixture timestamp is unambiguous")
}

#[fixture]
fn draft() -> ComplaintDraft {
    ComplaintDraft::parse(Some("Ada"), Some("Printer jammed"), None).expect("valid draft")
}

#[rstest]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case("3fa85f6457174562b3fc2c963f66afa6")]
fn complaint_id_accepts_canonical_forms(#[case] raw: &str) {
    assert!(ComplaintId::parse(raw).is_ok());
}

#[rstest]
#[case("abc")]
#[case("")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case("{3fa85f64-5717-4562-b3fc-2c963f66afa6}")]
#[case("urn:uuid:3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case("zzzzzzzz-5717-4562-b3fc-2c963f66afa6")]
fn complaint_id_rejects_malformed_values(#[case] raw: &str) {
    assert_eq!(
        ComplaintId::parse(raw),
        Err(ComplaintValidationError::InvalidId)
    );
}

#[rstest]
#[case(None, Priority::Low)]
#[case(Some("Low"), Priority::Low)]
#[case(Some("Medium"), Priority::Medium)]
#[case(Some("High"), Priority::High)]
fn priority_resolves_known_values(#[case] raw: Option<&str>, #[case] expected: Priority) {
    assert_eq!(Priority::from_optional(raw), Ok(expected));
}

#[rstest]
#[case("")]
#[case("high")]
#[case("Urgent")]
#[case(" Low")]
fn priority_is_case_sensitive_and_closed(#[case] raw: &str) {
    assert_eq!(
        Priority::from_optional(Some(raw)),
        Err(ComplaintValidationError::InvalidPriority)
    );
}

#[rstest]
fn draft_trims_text_fields() {
    let draft = ComplaintDraft::parse(Some("  Ada  "), Some("\tLeaky tap\n"), Some("High"))
        .expect("valid draft");

    assert_eq!(draft.user_name().as_ref(), "Ada");
    assert_eq!(draft.issue().as_ref(), "Leaky tap");
    assert_eq!(draft.priority(), Priority::High);
}

#[rstest]
fn draft_collects_every_failure_in_field_order() {
    let errors = ComplaintDraft::parse(Some(""), Some("   "), Some("Urgent"))
        .expect_err("three rules fail");

    let collected: Vec<_> = errors.into_iter().collect();
    assert_eq!(
        collected,
        vec![
            ComplaintValidationError::MissingUserName,
            ComplaintValidationError::MissingIssue,
            ComplaintValidationError::InvalidPriority,
        ]
    );
}

#[rstest]
fn missing_fields_are_required() {
    let errors = ComplaintDraft::parse(None, None, None).expect_err("both text fields missing");

    assert!(errors.mentions(ComplaintField::UserName));
    assert!(errors.mentions(ComplaintField::Issue));
    assert!(!errors.mentions(ComplaintField::Priority));
}

#[rstest]
fn validation_errors_convert_to_invalid_request() {
    let errors = ComplaintDraft::parse(None, Some("ok"), None).expect_err("user name missing");

    let error = Error::from(errors);

    assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    assert_eq!(error.message(), COMPLAINT_VALIDATION_FAILED);
    assert_eq!(
        error.details(),
        Some(&json!({
            "errors": [{
                "field": "userName",
                "code": "required",
                "message": "userName is required",
            }]
        }))
    );
}

#[rstest]
fn from_vec_rejects_empty_lists() {
    assert!(ComplaintValidationErrors::from_vec(Vec::new()).is_none());
}

#[rstest]
fn create_sets_equal_timestamps(draft: ComplaintDraft, created_at: DateTime<Utc>) {
    let complaint = Complaint::create(ComplaintId::random(), draft, created_at);

    assert_eq!(complaint.created_at(), created_at);
    assert_eq!(complaint.updated_at(), created_at);
    assert_eq!(complaint.priority(), Priority::Low);
}

#[rstest]
fn create_truncates_to_storage_precision(draft: ComplaintDraft, created_at: DateTime<Utc>) {
    let now = created_at + TimeDelta::nanoseconds(1_500);

    let complaint = Complaint::create(ComplaintId::random(), draft, now);

    assert_eq!(complaint.created_at(), created_at + TimeDelta::microseconds(1));
}

#[rstest]
fn revise_keeps_identity_and_creation_time(draft: ComplaintDraft, created_at: DateTime<Utc>) {
    let original = Complaint::create(ComplaintId::random(), draft, created_at);
    let replacement =
        ComplaintDraft::parse(Some("Grace"), Some("Fixed?"), Some("Medium")).expect("valid");

    let revised = original.revise(replacement, created_at + TimeDelta::seconds(5));

    assert_eq!(revised.id(), original.id());
    assert_eq!(revised.created_at(), original.created_at());
    assert_eq!(revised.user_name().as_ref(), "Grace");
    assert_eq!(revised.priority(), Priority::Medium);
    assert_eq!(revised.updated_at(), created_at + TimeDelta::seconds(5));
}

#[rstest]
fn revise_advances_updated_at_when_clock_stalls(draft: ComplaintDraft, created_at: DateTime<Utc>) {
    let original = Complaint::create(ComplaintId::random(), draft.clone(), created_at);

    let revised = original.revise(draft, created_at - TimeDelta::seconds(1));

    assert!(revised.updated_at() > original.updated_at());
    assert_eq!(
        revised.updated_at(),
        created_at + TimeDelta::microseconds(1)
    );
}

#[rstest]
fn restore_rejects_updated_before_created(draft: ComplaintDraft, created_at: DateTime<Utc>) {
    let result = Complaint::restore(
        ComplaintId::random(),
        draft,
        created_at,
        created_at - TimeDelta::seconds(1),
    );

    assert_eq!(result, Err(ComplaintValidationError::UpdatedBeforeCreated));
}
