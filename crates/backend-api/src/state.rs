use std::sync::Arc;

use hello_components::MessageComponent;
use hello_database::MessageRepository;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    messages: Arc<MessageComponent<MessageRepository>>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            messages: Arc::new(MessageComponent::new(db_pool)),
        }
    }

    pub fn messages(&self) -> &MessageComponent<MessageRepository> {
        &self.messages
    }
}
