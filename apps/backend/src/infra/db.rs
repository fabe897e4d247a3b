use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

fn engine(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Opens a pooled connection for `kind`. Does NOT run migrations.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    connect_url(kind, &url).await
}

/// Like [`connect_db`] with an explicit URL.
pub async fn connect_url(kind: DbKind, url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match kind {
        // every pooled connection to `sqlite::memory:` is a separate database
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(4);
        }
        DbKind::Postgres => {
            opts.max_connections(16).min_connections(1);
        }
    }

    let conn = Database::connect(opts)
        .await
        .map_err(|e| AppError::db_unavailable(format!("{} connect failed: {e}", engine(kind))))?;
    info!(engine = engine(kind), "database connected");
    Ok(conn)
}

/// Connects and applies pending migrations.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    migrate_up(&conn).await?;
    Ok(conn)
}

pub async fn migrate_up(conn: &DatabaseConnection) -> Result<(), AppError> {
    migration::migrate(conn, migration::MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))
}
