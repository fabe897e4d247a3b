use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};

use crate::auth::{AuthError, HeaderFault, Permission, RequiredPermission, TokenClaims};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Verified claims of a caller holding permission `P`.
///
/// Resolves before the handler body runs, so a rejected request never
/// reaches storage.
#[derive(Debug, Clone)]
pub struct Authorized<P: RequiredPermission> {
    pub claims: TokenClaims,
    _permission: PhantomData<P>,
}

/// Authorization result left in the request extensions for `StructuredLogger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted(Permission),
    Rejected {
        permission: Permission,
        code: &'static str,
    },
}

impl AuthOutcome {
    pub fn permission(&self) -> Permission {
        match self {
            AuthOutcome::Granted(permission) => *permission,
            AuthOutcome::Rejected { permission, .. } => *permission,
        }
    }

    pub fn rejection_code(&self) -> Option<&'static str> {
        match self {
            AuthOutcome::Granted(_) => None,
            AuthOutcome::Rejected { code, .. } => Some(*code),
        }
    }
}

fn raw_authorization(req: &HttpRequest) -> Result<Option<String>, AuthError> {
    match req.headers().get(header::AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.to_owned()))
            .map_err(|_| AuthError::MalformedHeader(HeaderFault::InvalidEncoding)),
    }
}

impl<P: RequiredPermission> FromRequest for Authorized<P> {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
                AppError::internal("AppState not available for authorization")
            })?;

            let outcome = match raw_authorization(&req) {
                Ok(raw) => state.validator().authorize(raw.as_deref(), P::PERMISSION).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(claims) => {
                    req.extensions_mut()
                        .insert(AuthOutcome::Granted(P::PERMISSION));
                    Ok(Self {
                        claims,
                        _permission: PhantomData,
                    })
                }
                Err(e) => {
                    req.extensions_mut().insert(AuthOutcome::Rejected {
                        permission: P::PERMISSION,
                        code: e.code(),
                    });
                    Err(AppError::from(e))
                }
            }
        })
    }
}
