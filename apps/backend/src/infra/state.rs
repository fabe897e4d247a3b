use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::{KeyProvider, StaticKeys, TokenValidator};
use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::{bootstrap_db, migrate_up};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum DbSource {
    Kind(DbKind),
    Connection(DatabaseConnection),
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security: SecurityConfig,
    keys: Option<Arc<dyn KeyProvider>>,
    db: Option<DbSource>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security: SecurityConfig::new("https://localhost/", "drinks"),
            keys: None,
            db: None,
        }
    }

    /// Connect to `kind` and migrate it during [`build`](Self::build).
    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db = Some(DbSource::Kind(kind));
        self
    }

    /// Use an already open connection; migrations still run.
    pub fn with_connection(mut self, conn: DatabaseConnection) -> Self {
        self.db = Some(DbSource::Connection(conn));
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    pub fn with_key_provider(mut self, keys: Arc<dyn KeyProvider>) -> Self {
        self.keys = Some(keys);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        // no provider means no token can verify
        let keys = self
            .keys
            .unwrap_or_else(|| Arc::new(StaticKeys::empty()) as Arc<dyn KeyProvider>);
        let validator = TokenValidator::new(self.security, keys);

        match self.db {
            Some(DbSource::Kind(kind)) => {
                let conn = bootstrap_db(kind).await?;
                Ok(AppState::new(conn, validator))
            }
            Some(DbSource::Connection(conn)) => {
                migrate_up(&conn).await?;
                Ok(AppState::new(conn, validator))
            }
            None => Ok(AppState::new_without_db(validator)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
