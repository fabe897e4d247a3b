//! Error envelope test helpers.
//!
//! Validates the `{success, error, message, code}` body and the `x-trace-id`
//! header without depending on backend types.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EnvelopeLike {
    pub success: bool,
    pub error: u16,
    pub message: String,
    pub code: String,
}

/// Assert that response parts form an error envelope with the given status
/// and machine code. Returns the parsed envelope for further checks.
pub fn assert_envelope_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> EnvelopeLike {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let trace_id = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(!trace_id.is_empty(), "x-trace-id header missing");

    let envelope: EnvelopeLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "body is not an error envelope ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    assert!(!envelope.success, "success must be false on errors");
    assert_eq!(envelope.error, expected_status.as_u16(), "error field");
    assert_eq!(envelope.code, expected_code, "code field");
    assert!(!envelope.message.is_empty(), "message must not be empty");
    envelope
}
