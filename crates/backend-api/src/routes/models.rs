use hello_database::Message;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A message as clients see it. `id` is the external identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageViewModel {
    pub id: Uuid,
    #[schema(example = "Hello, world!")]
    pub content: String,
}

/// Payload accepted when adding or editing a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MessageAddEditViewModel {
    #[serde(default)]
    #[schema(example = "Hello, world!", min_length = 1, max_length = 256)]
    pub content: Option<String>,
}

impl From<Message> for MessageViewModel {
    fn from(message: Message) -> Self {
        Self {
            id: message.external_id,
            content: message.content,
        }
    }
}

impl MessageViewModel {
    /// Relative URL under which the message can be fetched.
    pub fn location(&self) -> String {
        format!("/messages/{}", self.id)
    }
}
