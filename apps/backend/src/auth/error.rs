//! Authentication and authorization failures.
//!
//! Every variant carries a stable lowercase `code` so clients (and logs) can
//! tell malformed headers, unknown keys and bad claims apart.

use actix_web::http::StatusCode;
use thiserror::Error;

/// Why an `Authorization` header could not yield a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderFault {
    /// First segment is not the `Bearer` scheme
    NoBearerScheme,
    /// Scheme present but no token follows it
    TokenNotFound,
    /// More than `Bearer <token>` was supplied
    MultipleParts,
    /// Header bytes are not visible ASCII, or the token is empty
    InvalidEncoding,
}

impl HeaderFault {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoBearerScheme => "no_auth_scheme",
            Self::TokenNotFound => "token_not_found",
            Self::MultipleParts => "multiple_header_parts",
            Self::InvalidEncoding => "malformed_bearer_token",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::NoBearerScheme => "Authorization header must start with \"Bearer\".",
            Self::TokenNotFound => "Token not found.",
            Self::MultipleParts => "Authorization header must be bearer token.",
            Self::InvalidEncoding => "Authorization header is not a well-formed bearer token.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,
    #[error("{}", .0.description())]
    MalformedHeader(HeaderFault),
    #[error("Unable to find the appropriate key.")]
    InvalidKeyId,
    #[error("Token expired.")]
    TokenExpired,
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,
    #[error("Unable to parse authentication token.")]
    InvalidHeader,
    #[error("Permission not found.")]
    Unauthorized,
    #[error("Unable to retrieve the signing key set.")]
    KeySetUnavailable,
}

impl AuthError {
    /// Machine-readable sub-reason, surfaced as `code` in the error body.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "authorization_header_missing",
            Self::MalformedHeader(fault) => fault.code(),
            Self::InvalidKeyId => "invalid_key_id",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::InvalidHeader => "invalid_header",
            Self::Unauthorized => "unauthorized",
            Self::KeySetUnavailable => "key_set_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::KeySetUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
