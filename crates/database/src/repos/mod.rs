//! Database repository implementations

pub mod message_repository;

pub use message_repository::MessageRepository;

use crate::entities::Message;
use crate::types::MessageResult;
use uuid::Uuid;

/// Trait for message repositories to allow generic usage.
///
/// Write operations take an `Option` so that an absent message is rejected
/// with [`MessageError::InvalidArgument`](crate::MessageError::InvalidArgument)
/// instead of reaching the store. Edits and removals match rows by the
/// internal id carried in the message; when no row matches, implementations
/// report [`MessageError::ConcurrencyConflict`](crate::MessageError::ConcurrencyConflict).
pub trait MessageRepo {
    /// Every stored message, in store order.
    async fn list_messages(&self) -> MessageResult<Vec<Message>>;

    /// Persist a new message, assigning a fresh identity and `added_on`.
    async fn add_message(&self, message: Option<Message>) -> MessageResult<Message>;

    /// Look a message up by its external id.
    async fn get_message(&self, external_id: Uuid) -> MessageResult<Option<Message>>;

    /// Replace the content of an existing message and stamp `edited_on`.
    async fn edit_message(&self, message: Option<Message>) -> MessageResult<Message>;

    /// Permanently delete an existing message.
    async fn remove_message(&self, message: Option<Message>) -> MessageResult<()>;
}
