//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("complaint repository error: relation \"complaints\" does not exist")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"sql": "select * from complaints"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("complaint validation failed")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"errors": [{"field": "issue", "code": "required"}]}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("Complaint not found"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn assert_error_response(
    response: HttpResponse,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(
    #[from(internal_error_case)] internal_error: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error.error_response(),
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_their_details(
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let payload = assert_error_response(
        invalid_request.error_response(),
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "complaint validation failed");
    assert_eq!(
        payload.details(),
        Some(&json!({"errors": [{"field": "issue", "code": "required"}]}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("Complaint not found");

    let payload =
        assert_error_response(error.error_response(), StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
#[actix_web::test]
async fn json_error_handler_returns_invalid_request_envelope() {
    let request = TestRequest::default().to_http_request();

    let error = json_error_handler(JsonPayloadError::ContentType, &request);

    let payload =
        assert_error_response(error.error_response(), StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.message(), MALFORMED_BODY_MESSAGE);
    assert_eq!(
        payload
            .details()
            .and_then(|details| details["errors"][0]["code"].as_str()),
        Some("invalid_json")
    );
}
