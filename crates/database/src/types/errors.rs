//! Error types for the database layer

use thiserror::Error;

/// Errors raised while bootstrapping the database
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Errors raised by message repository operations.
///
/// A lookup that finds nothing is not an error; it is reported as `None`.
#[derive(Debug, Error)]
pub enum MessageError {
    /// An absent message was handed to a write operation.
    #[error("Invalid argument: {0} must be provided")]
    InvalidArgument(&'static str),

    /// The row targeted by an edit or removal no longer exists (or never did).
    #[error("Concurrency conflict: message {id} was not found at write time")]
    ConcurrencyConflict { id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned back into a `Message`.
    #[error("Corrupt message row: {0}")]
    Decode(String),
}

impl MessageError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}
