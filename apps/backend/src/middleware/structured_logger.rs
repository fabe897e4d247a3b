//! One `request_completed` event per request.
//!
//! The event carries the matched route pattern and, for protected routes, the
//! [`AuthOutcome`] that `Authorized` left in the request extensions. A
//! rejected call is therefore a single `warn` line naming the permission and
//! the auth sub-reason code.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::extractors::AuthOutcome;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What the `request_completed` event reports about one request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Completion {
    method: String,
    route: String,
    status: StatusCode,
    auth: Option<AuthOutcome>,
}

impl Completion {
    /// `route` is the matched pattern (`/drinks/{id:\d+}`), or the raw path
    /// when nothing matched.
    fn from_response<B>(res: &ServiceResponse<B>) -> Self {
        let req = res.request();
        Self {
            method: req.method().to_string(),
            route: req
                .match_pattern()
                .unwrap_or_else(|| req.path().to_string()),
            status: res.status(),
            auth: req.extensions().get::<AuthOutcome>().copied(),
        }
    }

    fn emit(&self, trace_id: &str, duration_us: u64) {
        let method = &self.method;
        let route = &self.route;
        let status_code = self.status.as_u16();
        let permission = self.auth.map(|a| a.permission().as_str());
        let auth_code = self.auth.and_then(|a| a.rejection_code());

        macro_rules! completed {
            ($level:ident) => {
                $level!(
                    http.method = %method,
                    http.route = %route,
                    http.status_code = status_code,
                    duration_us,
                    trace_id,
                    auth.permission = permission,
                    auth.code = auth_code,
                    "request_completed"
                )
            };
        }

        if self.status.is_server_error() {
            completed!(error);
        } else if self.status.is_client_error() {
            completed!(warn);
        } else {
            completed!(info);
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let completion = match &result {
                Ok(res) => Completion::from_response(res),
                Err(err) => Completion {
                    method,
                    route: path,
                    status: err.as_response_error().status_code(),
                    auth: None,
                },
            };
            completion.emit(&trace_id, start.elapsed().as_micros() as u64);

            result
        })
    }
}
