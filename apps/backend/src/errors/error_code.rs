//! Error codes for the drinks API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Codes are SCREAMING_SNAKE_CASE and appear verbatim in the `code` field of
//! every error envelope that is not an authentication failure.

use core::fmt;

/// Centralized error codes for the drinks API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    /// Token is valid but lacks the permission for this operation
    Forbidden,

    // Request validation
    /// Storage rejected the write
    Unprocessable,
    /// Route exists but not for this method
    MethodNotAllowed,

    // Resource not found
    /// No drink with the requested id
    DrinkNotFound,
    /// General not found error (no rows, unknown route)
    NotFound,

    // System errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Stored data could not be decoded
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "FORBIDDEN",

            Self::Unprocessable => "UNPROCESSABLE",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",

            Self::DrinkNotFound => "DRINK_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
