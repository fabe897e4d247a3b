use std::env;
use std::str::FromStr;

use super::must_var;
use crate::error::AppError;

/// Storage backend selected with `DB_KIND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// PostgreSQL at `DATABASE_URL`
    Postgres,
    /// SQLite file at `SQLITE_PATH`
    SqliteFile,
    /// Process-local SQLite, gone when the pool closes
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unsupported DB_KIND '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

impl DbKind {
    /// `DB_KIND`, defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("DB_KIND") {
            Ok(v) if !v.trim().is_empty() => v.parse(),
            _ => Ok(DbKind::Postgres),
        }
    }
}

const DEFAULT_SQLITE_PATH: &str = "drinks.sqlite";

/// Builds the connection URL for the given backend from environment variables.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => must_var("DATABASE_URL"),
        DbKind::SqliteFile => {
            let path = env::var("SQLITE_PATH").unwrap_or_else(|_| DEFAULT_SQLITE_PATH.to_string());
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}
