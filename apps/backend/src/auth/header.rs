//! `Authorization: Bearer <token>` parsing.

use super::error::{AuthError, HeaderFault};

pub const BEARER_SCHEME: &str = "Bearer";

/// Pull the bearer token out of a raw `Authorization` header value.
///
/// The scheme is matched case-insensitively. Exactly two whitespace-separated
/// segments are accepted; anything else maps to a distinct `HeaderFault`.
pub fn extract_bearer_token(raw: Option<&str>) -> Result<&str, AuthError> {
    let raw = raw.ok_or(AuthError::MissingHeader)?;

    let mut parts = raw.split_whitespace();
    let scheme = parts
        .next()
        .ok_or(AuthError::MalformedHeader(HeaderFault::NoBearerScheme))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::MalformedHeader(HeaderFault::NoBearerScheme));
    }

    let token = parts
        .next()
        .ok_or(AuthError::MalformedHeader(HeaderFault::TokenNotFound))?;
    if parts.next().is_some() {
        return Err(AuthError::MalformedHeader(HeaderFault::MultipleParts));
    }
    if !token.chars().all(|c| c.is_ascii_graphic()) {
        return Err(AuthError::MalformedHeader(HeaderFault::InvalidEncoding));
    }

    Ok(token)
}
