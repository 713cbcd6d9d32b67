//! Repository for message data access operations.

use crate::entities::Message;
use crate::repos::MessageRepo;
use crate::types::{MessageError, MessageResult};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Repository for message database operations
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The pool backing this repository
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Find every message
    pub async fn find_all(&self) -> MessageResult<Vec<Message>> {
        let rows = sqlx::query(
            "SELECT id, external_id, content, added_on, edited_on FROM messages",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "listed messages");
        rows.iter().map(message_from_row).collect()
    }

    /// Find a message by its external ID
    pub async fn find_by_external_id(&self, external_id: Uuid) -> MessageResult<Option<Message>> {
        let row = sqlx::query(
            "SELECT id, external_id, content, added_on, edited_on
             FROM messages WHERE external_id = ?",
        )
        .bind(external_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(message_from_row).transpose()
    }

    /// Insert a message under a freshly generated identity
    pub async fn create(&self, message: Message) -> MessageResult<Message> {
        let external_id = Uuid::new_v4();
        let added_on = Utc::now();

        let id = sqlx::query(
            "INSERT INTO messages (external_id, content, added_on) VALUES (?, ?, ?)",
        )
        .bind(external_id.to_string())
        .bind(&message.content)
        .bind(added_on)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(message_id = id, external_id = %external_id, "created new message");

        Ok(Message {
            id,
            external_id,
            content: message.content,
            added_on,
            edited_on: None,
        })
    }

    /// Update the content of the row matching `message.id`
    pub async fn update(&self, message: Message) -> MessageResult<Message> {
        let edited_on = Utc::now();

        let row = sqlx::query(
            "UPDATE messages SET content = ?, edited_on = ? WHERE id = ?
             RETURNING id, external_id, content, added_on, edited_on",
        )
        .bind(&message.content)
        .bind(edited_on)
        .bind(message.id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            warn!(message_id = message.id, "edit matched no message");
            return Err(MessageError::ConcurrencyConflict { id: message.id });
        };

        let updated = message_from_row(&row)?;
        info!(message_id = updated.id, external_id = %updated.external_id, "edited message");
        Ok(updated)
    }

    /// Delete the row matching `message.id`
    pub async fn delete(&self, message: &Message) -> MessageResult<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(message.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(message_id = message.id, "removal matched no message");
            return Err(MessageError::ConcurrencyConflict { id: message.id });
        }

        info!(message_id = message.id, external_id = %message.external_id, "removed message");
        Ok(())
    }

    /// Delete every message, returning how many rows went away
    pub async fn delete_all(&self) -> MessageResult<u64> {
        let result = sqlx::query("DELETE FROM messages")
            .execute(&self.pool)
            .await?;

        info!(removed = result.rows_affected(), "cleared messages");
        Ok(result.rows_affected())
    }
}

fn message_from_row(row: &SqliteRow) -> MessageResult<Message> {
    let raw_external_id: String = row.try_get("external_id")?;
    let external_id = Uuid::parse_str(&raw_external_id)
        .map_err(|e| MessageError::Decode(format!("external_id {raw_external_id:?}: {e}")))?;

    Ok(Message {
        id: row.try_get("id")?,
        external_id,
        content: row.try_get("content")?,
        added_on: row.try_get("added_on")?,
        edited_on: row.try_get("edited_on")?,
    })
}

impl MessageRepo for MessageRepository {
    async fn list_messages(&self) -> MessageResult<Vec<Message>> {
        self.find_all().await
    }

    async fn add_message(&self, message: Option<Message>) -> MessageResult<Message> {
        let message = message.ok_or(MessageError::InvalidArgument("message"))?;
        self.create(message).await
    }

    async fn get_message(&self, external_id: Uuid) -> MessageResult<Option<Message>> {
        self.find_by_external_id(external_id).await
    }

    async fn edit_message(&self, message: Option<Message>) -> MessageResult<Message> {
        let message = message.ok_or(MessageError::InvalidArgument("message"))?;
        self.update(message).await
    }

    async fn remove_message(&self, message: Option<Message>) -> MessageResult<()> {
        let message = message.ok_or(MessageError::InvalidArgument("message"))?;
        self.delete(&message).await
    }
}
