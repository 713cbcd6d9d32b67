//! HelloWorld Database Crate
//!
//! Connection management, migrations, the `Message` entity and the message
//! repository that owns identity assignment for the HelloWorld backend.

use hello_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use entities::{Message, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH};
pub use repos::{MessageRepo, MessageRepository};
pub use types::{DatabaseError, DatabaseResult, MessageError, MessageResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
