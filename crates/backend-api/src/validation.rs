//! Request validation for message payloads.

use hello_database::{MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("content is required")]
    MissingContent,
    #[error("content must not be blank")]
    EmptyContent,
    #[error("content must be at most {max} characters, got {actual}")]
    ContentTooLong { max: usize, actual: usize },
}

/// Check message content and hand it back when acceptable.
///
/// Length is counted in characters, not bytes.
pub fn validate_content(content: Option<String>) -> Result<String, ValidationError> {
    let content = content.ok_or(ValidationError::MissingContent)?;

    if content.trim().chars().count() < MIN_CONTENT_LENGTH {
        return Err(ValidationError::EmptyContent);
    }

    let actual = content.chars().count();
    if actual > MAX_CONTENT_LENGTH {
        return Err(ValidationError::ContentTooLong {
            max: MAX_CONTENT_LENGTH,
            actual,
        });
    }

    Ok(content)
}
