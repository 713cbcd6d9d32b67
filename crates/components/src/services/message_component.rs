//! Message component coordinating validation and repository access.

use super::mock_repositories::InMemoryMessageRepository;
use hello_database::{Message, MessageError, MessageRepo, MessageRepository, MessageResult};
use sqlx::sqlite::SqlitePool;
use tracing::debug;
use uuid::Uuid;

/// Component for message operations
pub struct MessageComponent<R> {
    message_repository: R,
}

impl MessageComponent<MessageRepository> {
    /// Create a new message component backed by the SQLite repository
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_repository(MessageRepository::new(pool))
    }
}

impl MessageComponent<InMemoryMessageRepository> {
    /// Create a new message component for testing
    pub fn new_for_testing() -> Self {
        Self::with_repository(InMemoryMessageRepository::new())
    }
}

impl<R> MessageComponent<R>
where
    R: MessageRepo,
{
    pub fn with_repository(message_repository: R) -> Self {
        Self { message_repository }
    }

    /// List every message
    pub async fn list_messages(&self) -> MessageResult<Vec<Message>> {
        self.message_repository.list_messages().await
    }

    /// Add a new message
    pub async fn add_message(&self, message: Option<Message>) -> MessageResult<Message> {
        let message = require(message)?;
        self.message_repository.add_message(Some(message)).await
    }

    /// Get a message by its external ID
    pub async fn get_message(&self, external_id: Uuid) -> MessageResult<Option<Message>> {
        debug!(external_id = %external_id, "looking up message");
        self.message_repository.get_message(external_id).await
    }

    /// Edit an existing message
    pub async fn edit_message(&self, message: Option<Message>) -> MessageResult<Message> {
        let message = require(message)?;
        self.message_repository.edit_message(Some(message)).await
    }

    /// Remove an existing message
    pub async fn remove_message(&self, message: Option<Message>) -> MessageResult<()> {
        let message = require(message)?;
        self.message_repository.remove_message(Some(message)).await
    }
}

fn require(message: Option<Message>) -> MessageResult<Message> {
    message.ok_or(MessageError::InvalidArgument("message"))
}
