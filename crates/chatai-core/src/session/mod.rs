//! Session domain module.
//!
//! This module contains the transcript data model and the store that owns it.
//!
//! # Module Structure
//!
//! - `message`: Transcript message types (`MessageRole`, `Message`)
//! - `conversation`: Saved session snapshots (`Conversation`)
//! - `store`: Live session and saved collection (`SessionStore`)
//! - `repository`: Repository trait for conversation persistence
//!
//! # Usage
//!
//! ```
//! use chatai_core::session::{MessageRole, SessionStore};
//!
//! let mut store = SessionStore::default();
//! store.append(MessageRole::User, "hello", None);
//! let saved = store.save(Some("first chat"));
//! assert_eq!(saved.messages().len(), 1);
//! ```

mod conversation;
mod message;
mod repository;
mod store;

// Re-export public API
pub use conversation::{Conversation, DEFAULT_NAME_FORMAT, DEFAULT_NAME_PREFIX};
pub use message::{Message, MessageRole};
pub use repository::ConversationRepository;
pub use store::SessionStore;
