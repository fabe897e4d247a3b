#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{AuthError, Permission, StaticKeys, TokenClaims, TokenValidator};
pub use config::db::DbKind;
pub use error::AppError;
pub use extractors::Authorized;
pub use infra::db::connect_db;
pub use middleware::{cors_default_headers, cors_middleware, RequestTrace, StructuredLogger};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
