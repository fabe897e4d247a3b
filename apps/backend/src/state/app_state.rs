use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::TokenValidator;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in auth-only test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Bearer token verification against the trusted issuer
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, validator: TokenValidator) -> Self {
        Self {
            db: Some(db),
            validator: Arc::new(validator),
        }
    }

    pub fn new_without_db(validator: TokenValidator) -> Self {
        Self {
            db: None,
            validator: Arc::new(validator),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }
}
