//! In-memory repository implementation for exercising component logic

use chrono::Utc;
use hello_database::{Message, MessageError, MessageRepo, MessageResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Message repository kept entirely in memory
#[derive(Clone)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<BTreeMap<i64, Message>>>,
    next_id: Arc<RwLock<i64>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageRepo for InMemoryMessageRepository {
    async fn list_messages(&self) -> MessageResult<Vec<Message>> {
        let messages = self.messages.read().await;
        Ok(messages.values().cloned().collect())
    }

    async fn add_message(&self, message: Option<Message>) -> MessageResult<Message> {
        let message = message.ok_or(MessageError::InvalidArgument("message"))?;

        let mut next_id = self.next_id.write().await;
        let id = *next_id;
        *next_id += 1;

        let stored = Message {
            id,
            external_id: Uuid::new_v4(),
            content: message.content,
            added_on: Utc::now(),
            edited_on: None,
        };

        self.messages.write().await.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_message(&self, external_id: Uuid) -> MessageResult<Option<Message>> {
        let messages = self.messages.read().await;
        Ok(messages
            .values()
            .find(|m| m.external_id == external_id)
            .cloned())
    }

    async fn edit_message(&self, message: Option<Message>) -> MessageResult<Message> {
        let message = message.ok_or(MessageError::InvalidArgument("message"))?;

        let mut messages = self.messages.write().await;
        let stored = messages
            .get_mut(&message.id)
            .ok_or(MessageError::ConcurrencyConflict { id: message.id })?;

        stored.content = message.content;
        stored.edited_on = Some(Utc::now());
        Ok(stored.clone())
    }

    async fn remove_message(&self, message: Option<Message>) -> MessageResult<()> {
        let message = message.ok_or(MessageError::InvalidArgument("message"))?;

        let mut messages = self.messages.write().await;
        messages
            .remove(&message.id)
            .map(|_| ())
            .ok_or(MessageError::ConcurrencyConflict { id: message.id })
    }
}
