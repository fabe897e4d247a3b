use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: u16,
    pub message: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Forbidden: {detail}")]
    Forbidden { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Unprocessable: {detail}")]
    Unprocessable { detail: String },
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Machine code for the `code` field. Auth failures keep their lowercase
    /// sub-reason; everything else uses an [`ErrorCode`].
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Auth(e) => e.code(),
            AppError::Forbidden { .. } => ErrorCode::Forbidden.as_str(),
            AppError::NotFound { code, .. } => code.as_str(),
            AppError::Unprocessable { .. } => ErrorCode::Unprocessable.as_str(),
            AppError::MethodNotAllowed => ErrorCode::MethodNotAllowed.as_str(),
            AppError::Db { .. } => ErrorCode::DbError.as_str(),
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable.as_str(),
            AppError::Internal { code, .. } => code.as_str(),
            AppError::Config { .. } => ErrorCode::ConfigError.as_str(),
        }
    }

    /// Human-readable `message`. Server-side details stay in the logs.
    fn message(&self) -> String {
        match self {
            AppError::Auth(e) => e.to_string(),
            AppError::Forbidden { .. } => "forbidden".to_string(),
            AppError::NotFound { .. } => "Not found".to_string(),
            AppError::Unprocessable { .. } => "unprocessable".to_string(),
            AppError::MethodNotAllowed => "method not allowed".to_string(),
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                "internal server error".to_string()
            }
            AppError::DbUnavailable { .. } => "service unavailable".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(e) => e.status(),
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::Unprocessable {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            success: false,
            error: self.status().as_u16(),
            message: self.message(),
            code: self.code().to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(_, detail) => AppError::not_found(ErrorCode::NotFound, detail),
            // Storage refused the write (duplicate title, NOT NULL)
            DomainError::Conflict(_, detail) => AppError::unprocessable(detail),
            DomainError::Infra(InfraErrorKind::DbUnavailable, detail)
            | DomainError::Infra(InfraErrorKind::Timeout, detail) => AppError::db_unavailable(detail),
            DomainError::Infra(InfraErrorKind::DataCorruption, detail) => AppError::Internal {
                code: ErrorCode::DataCorruption,
                detail,
            },
            DomainError::Infra(InfraErrorKind::Other(_), detail) => AppError::db(detail),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status())
            .insert_header(("x-trace-id", trace_ctx::trace_id()))
            .json(self.envelope())
    }
}
