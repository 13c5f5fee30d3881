//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("deviceModel must not be blank"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("tracking code not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("repair is already completed"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("pool exhausted"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("insert into repair_progress failed"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
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
async fn internal_errors_are_redacted_but_keep_the_trace_id(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let redacted = assert_error_response(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), REDACTED_MESSAGE);
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn conflicts_keep_their_details(expected_trace_id: String) {
    let error = Error::conflict("cannot move a repair from completed to repairing")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"code": "invalid_transition", "from": "completed", "to": "repairing"}));

    let payload =
        assert_error_response(error, StatusCode::CONFLICT, Some(expected_trace_id.as_str())).await;

    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(
        payload.details(),
        Some(&json!({"code": "invalid_transition", "from": "completed", "to": "repairing"}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "status"}));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.details(), Some(&json!({"field": "status"})));
}

#[rstest]
#[case(Error::not_found("repair 3 not found"))]
#[case(Error::conflict("tracking codes exhausted").with_details(json!({"attempts": 5})))]
#[case(Error::invalid_request("status is not recognised").with_details(json!({"field": "status"})))]
fn client_errors_reach_the_client_unchanged(#[case] error: Error) {
    assert_eq!(client_view(&error), error);
}

#[rstest]
fn failed_statement_text_never_reaches_the_client() {
    let error = Error::internal("duplicate key value violates \"repairs_pkey\"");

    let shown = client_view(&error);

    assert_eq!(shown.message(), REDACTED_MESSAGE);
    assert_eq!(shown.trace_id(), None);
}
