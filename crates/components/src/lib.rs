//! # HelloWorld Components Crate
//!
//! The orchestration layer between the HTTP surface and the message store.
//! [`MessageComponent`] re-validates its inputs and delegates to any
//! [`MessageRepo`]; [`InMemoryMessageRepository`] is a store-free
//! implementation of that trait used by tests.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo(pool: sqlx::SqlitePool) -> hello_database::MessageResult<()> {
//! use hello_components::MessageComponent;
//! use hello_database::Message;
//!
//! let component = MessageComponent::new(pool);
//! let added = component.add_message(Some(Message::new("Hello, world!"))).await?;
//! assert!(component.get_message(added.external_id).await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod services;

pub use hello_database::{Message, MessageError, MessageRepo, MessageRepository, MessageResult};
pub use services::{InMemoryMessageRepository, MessageComponent};
