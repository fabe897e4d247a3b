use clap::{Parser, ValueEnum};
use migration::sea_orm::{ConnectOptions, Database};
use migration::{database_name, migrate, seed_sample_drink, MigrationCommand};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
    /// Apply pending migrations, then insert the sample drink
    Seed,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Drinks database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database type. In-memory SQLite is not offered: it would vanish when the command exits.
    #[arg(short, long, value_enum, env = "DB_KIND", default_value = "postgres")]
    db: Db,

    /// Connection string for postgres
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// File path for sqlite-file
    #[arg(long, env = "SQLITE_PATH", default_value = "drinks.sqlite")]
    sqlite_path: String,
}

impl Args {
    fn url(&self) -> Result<String, String> {
        match self.db {
            Db::Postgres => self
                .database_url
                .clone()
                .filter(|u| !u.trim().is_empty())
                .ok_or_else(|| "DATABASE_URL (or --database-url) is required for postgres".into()),
            Db::SqliteFile => Ok(format!("sqlite://{}?mode=rwc", self.sqlite_path)),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let url = match args.url() {
        Ok(url) => url,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(1).sqlx_logging(false);
    let db = match Database::connect(opts).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to {:?} database: {e}", args.db);
            std::process::exit(1);
        }
    };

    if let Ok(name) = database_name(&db).await {
        tracing::info!(db = %name, "connected");
    }

    let outcome = match args.command {
        Command::Up => migrate(&db, MigrationCommand::Up).await,
        Command::Down => migrate(&db, MigrationCommand::Down).await,
        Command::Fresh => migrate(&db, MigrationCommand::Fresh).await,
        Command::Reset => migrate(&db, MigrationCommand::Reset).await,
        Command::Refresh => migrate(&db, MigrationCommand::Refresh).await,
        Command::Status => migrate(&db, MigrationCommand::Status).await,
        Command::Seed => match migrate(&db, MigrationCommand::Up).await {
            Ok(()) => seed_sample_drink(&db).await.map(|_| ()),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = outcome {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
