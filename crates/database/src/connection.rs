//! Database connection management

use anyhow::{Context, Result};
use hello_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::fs;
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Prepare and establish a database connection pool
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    ensure_sqlite_directory(&config.url).await?;

    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("invalid database url {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);

    // An in-memory database lives only as long as one of its connections.
    if is_in_memory(&config.url) {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

fn sqlite_path(url: &str) -> Option<&str> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    Some(path.split('?').next().unwrap_or(path))
}

fn is_in_memory(url: &str) -> bool {
    sqlite_path(url).map_or(false, |path| path.is_empty() || path == ":memory:")
}

/// Ensure the directory holding the SQLite database file exists
async fn ensure_sqlite_directory(url: &str) -> Result<()> {
    let Some(sqlite_path) = sqlite_path(url) else {
        return Ok(());
    };

    if is_in_memory(url) {
        return Ok(());
    }

    if let Some(parent) = Path::new(sqlite_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}
