//! Message entity definitions

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Fewest characters a message may hold.
pub const MIN_CONTENT_LENGTH: usize = 1;

/// Most characters a message may hold.
pub const MAX_CONTENT_LENGTH: usize = 256;

/// A message as stored in the `messages` table.
///
/// `id`, `external_id` and `added_on` are assigned by the repository when the
/// message is added; whatever a caller puts there beforehand is ignored.
/// Only `external_id` may leave the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub external_id: Uuid,
    pub content: String,
    pub added_on: DateTime<Utc>,
    pub edited_on: Option<DateTime<Utc>>,
}

impl Message {
    /// A message that has not been persisted yet.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn is_edited(&self) -> bool {
        self.edited_on.is_some()
    }
}
