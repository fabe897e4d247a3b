pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;
pub use sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250101_000001_create_drinks; // keep filename + module name in sync

use m20250101_000001_create_drinks::Drinks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_drinks::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Runs a migration command against an open connection.
/// Used by both the CLI and test bootstrap.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let before = count_applied_migrations(db).await?;
    tracing::info!(
        cmd = ?command,
        backend = ?backend,
        defined = Migrator::migrations().len(),
        applied = before,
        "migration starting"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if command != MigrationCommand::Status {
                let after = count_applied_migrations(db).await?;
                tracing::info!(cmd = ?command, applied = after, "migration finished");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(cmd = ?command, error = %e, "migration failed");
            Err(e)
        }
    }
}

/// Title of the sample row inserted by [`seed_sample_drink`].
pub const SAMPLE_DRINK_TITLE: &str = "water";

/// Inserts the sample "water" drink unless a drink with that title exists.
/// Returns `true` when a row was written.
pub async fn seed_sample_drink(db: &DatabaseConnection) -> Result<bool, DbErr> {
    let title = format!("\"{SAMPLE_DRINK_TITLE}\"");
    let recipe = r#"[{"name": "water", "color": "blue", "parts": 1}]"#;

    let existing = Query::select()
        .expr(Func::count(Expr::col(Drinks::Id)))
        .from(Drinks::Table)
        .and_where(Expr::col(Drinks::Title).eq(title.as_str()))
        .to_owned();
    let backend = db.get_database_backend();
    let count: i64 = match db.query_one(backend.build(&existing)).await? {
        Some(row) => row.try_get_by_index(0)?,
        None => 0,
    };
    if count > 0 {
        tracing::info!(title = SAMPLE_DRINK_TITLE, "sample drink already present");
        return Ok(false);
    }

    let insert = Query::insert()
        .into_table(Drinks::Table)
        .columns([Drinks::Title, Drinks::Recipe])
        .values_panic([title.into(), recipe.into()])
        .to_owned();
    db.execute(backend.build(&insert)).await?;
    tracing::info!(title = SAMPLE_DRINK_TITLE, "sample drink seeded");
    Ok(true)
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) | Err(DbErr::Query(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Get the version string of the latest applied migration.
/// Returns None if no migrations have been applied or the migration table doesn't exist.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) | Err(DbErr::Query(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Name of the connected database, for startup diagnostics.
pub async fn database_name(db: &DatabaseConnection) -> Result<String, DbErr> {
    let backend = db.get_database_backend();
    let sql = match backend {
        sea_orm::DatabaseBackend::Postgres => "select current_database() as name",
        sea_orm::DatabaseBackend::Sqlite => {
            "SELECT file AS name FROM pragma_database_list WHERE name = 'main'"
        }
        _ => return Ok("<unsupported>".to_string()),
    };
    let row = db
        .query_one(Statement::from_string(backend, sql.to_string()))
        .await?;
    let name = match row {
        Some(row) => row.try_get::<String>("", "name").unwrap_or_default(),
        None => String::new(),
    };
    Ok(if name.is_empty() {
        ":memory:".to_string()
    } else {
        name
    })
}
