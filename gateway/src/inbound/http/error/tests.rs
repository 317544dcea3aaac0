//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;

async fn render(error: Error) -> (StatusCode, serde_json::Value) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, body)
}

#[rstest]
#[case::invalid_request(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case::parameter(ErrorCode::UpstreamParameterError, StatusCode::BAD_REQUEST)]
#[case::not_found(ErrorCode::NotFoundOrRedirected, StatusCode::NOT_FOUND)]
#[case::out_of_scope(ErrorCode::ContentOutOfScope, StatusCode::NOT_FOUND)]
#[case::rate_limited(ErrorCode::UpstreamRateLimited, StatusCode::SERVICE_UNAVAILABLE)]
#[case::stale(ErrorCode::StaleCacheServed, StatusCode::SERVICE_UNAVAILABLE)]
#[case::internal(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] code: ErrorCode, #[case] expected: StatusCode) {
    let error = Error::new(code, "message");
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn client_errors_keep_their_message() {
    let (status, body) = render(Error::upstream_parameter("Invalid public_timestamp_from")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        serde_json::json!({
            "code": "UPSTREAM_PARAMETER_ERROR",
            "error": "Invalid public_timestamp_from",
        })
    );
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let (status, body) = render(Error::internal("invalid search JSON payload: eof")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({
            "code": "INTERNAL_ERROR",
            "error": "Internal server error",
        })
    );
}
