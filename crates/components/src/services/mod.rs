//! Business logic services for messages.

pub mod message_component;
mod mock_repositories;

pub use message_component::MessageComponent;
pub use mock_repositories::InMemoryMessageRepository;
