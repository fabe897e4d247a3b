use actix_web::web;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::{Error as JsonError, Map, Value};
use thiserror::Error;
use tracing::debug;

/// Upper bound on accepted request bodies.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Why a request body could not become the expected value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BodyError {
    #[error("Failed to read request body")]
    Read,
    #[error("Request body exceeds {MAX_BODY_BYTES} bytes")]
    TooLarge,
    #[error("{0}")]
    Invalid(String),
}

/// Drains `payload` and deserializes it as `T`. The body must be a JSON
/// object; arrays and scalars are rejected even when `T` could be filled
/// positionally.
///
/// Handlers call this after their authorization extractor has resolved, so
/// body problems are only ever reported to authorized callers.
pub async fn read_json<T: DeserializeOwned>(mut payload: web::Payload) -> Result<T, BodyError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            debug!(error = %e, "Failed to read request body chunk");
            BodyError::Read
        })?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(BodyError::TooLarge);
        }
        body.extend_from_slice(&chunk);
    }

    let invalid = |e: JsonError| {
        debug!(error = %e, body_size = body.len(), "JSON parsing failed");
        BodyError::Invalid(classify_json_error(&e))
    };
    let object = serde_json::from_slice::<Map<String, Value>>(&body).map_err(invalid)?;
    serde_json::from_value::<T>(Value::Object(object)).map_err(invalid)
}

/// Classify serde_json::Error and return a sanitized error message
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            let line = error.line();
            format!("Invalid JSON at line {line}")
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
