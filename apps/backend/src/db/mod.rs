pub mod txn;

use sea_orm::DatabaseConnection;

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::state::app_state::AppState;

/// Canonical access to the pooled connection held by [`AppState`].
///
/// Returns a `DomainError` so per-operation error enums can fold a missing
/// database into their own storage failure case.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, DomainError> {
    state.db().ok_or_else(|| {
        DomainError::infra(InfraErrorKind::DbUnavailable, "database not configured")
    })
}
