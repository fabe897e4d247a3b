#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::envelope::{assert_envelope_from_parts, EnvelopeLike};
use serde_json::Value;

// Logging is auto-installed for every test binary that includes `common`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Consume a response and assert it is the JSON error envelope.
pub async fn assert_envelope<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
) -> EnvelopeLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_envelope_from_parts(status, &headers, &body, expected_status, expected_code)
}

/// Consume a successful response and return its JSON body.
pub async fn ok_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        StatusCode::OK,
        "expected 200, body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("response body should be JSON")
}
