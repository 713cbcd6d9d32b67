//! Persisted entity definitions

pub mod message;

pub use message::{Message, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH};
