use crate::db::{DatabaseConnection, DatabaseKind, Db};
use anyhow::Context;
use std::env;
use std::path::Path;

/// File name of the default `SQLite` database inside the data directory.
pub const SQLITE_FILE_NAME: &str = "gatehouse.sqlite3";

/// Connects to a database and applies migrations.
/// We use `SQLite` by default, but we can override this by setting the `DATABASE_URL` environment variable.
///
/// # Errors
/// Errors if connection to database fails.
/// Connections can fail if the database is not running, or if the database URL is invalid.
/// Without `DATABASE_URL`, errors if `data_dir` doesn't exist.
pub async fn connect(data_dir: &Path) -> anyhow::Result<DatabaseConnection> {
    let db_url = match env::var("DATABASE_URL") {
        Ok(db_url) => db_url,
        Err(_) => sqlite_url(data_dir)?,
    };
    let connection = DatabaseConnection::connect(&db_url).await?;
    tracing::info!("Connected to database");
    migrate(&connection).await?;
    Ok(connection)
}

/// Bring the schema up to date.
///
/// # Errors
/// Errors if a migration fails to apply.
pub async fn migrate(connection: &DatabaseConnection) -> anyhow::Result<()> {
    match connection.kind {
        DatabaseKind::Sqlite => {
            sqlx::migrate!("./migrations/sqlite")
                .run(&connection.pool)
                .await?;
        }
    }
    tracing::debug!("Database migrations applied");
    Ok(())
}

/// URL of the default `SQLite` database in `data_dir`.
/// The directory is made absolute so the URL always takes the `sqlite:///` form.
fn sqlite_url(data_dir: &Path) -> anyhow::Result<String> {
    let data_dir = data_dir
        .canonicalize()
        .with_context(|| format!("Data directory '{}' is not accessible", data_dir.display()))?;
    let sqlite_db_path = data_dir.join(SQLITE_FILE_NAME);
    Ok(format!("sqlite://{}?mode=rwc", sqlite_db_path.to_string_lossy()))
}
