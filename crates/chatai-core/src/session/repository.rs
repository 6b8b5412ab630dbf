//! Conversation repository trait.
//!
//! Defines the interface for persisting saved conversations.

use super::conversation::Conversation;
use crate::error::Result;

/// An abstract repository for the saved conversation collection.
///
/// This trait decouples the store from the storage mechanism (JSON file,
/// database, remote API). The whole collection is read and written at once.
pub trait ConversationRepository: Send + Sync {
    /// Loads every persisted conversation in save order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Conversation>)`: Stored conversations (empty if nothing was stored yet)
    /// - `Err(_)`: Storage exists but could not be read or parsed
    fn load_all(&self) -> Result<Vec<Conversation>>;

    /// Replaces the persisted collection with `conversations`.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Written successfully
    /// - `Err(_)`: Error occurred during write
    fn save_all(&self, conversations: &[Conversation]) -> Result<()>;
}
