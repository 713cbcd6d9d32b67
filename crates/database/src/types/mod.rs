//! Shared types and result types for the database layer

pub mod errors;

pub use errors::{DatabaseError, MessageError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type MessageResult<T> = Result<T, MessageError>;
