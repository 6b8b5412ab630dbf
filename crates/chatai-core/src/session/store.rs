use super::conversation::Conversation;
use super::message::{Message, MessageRole};
use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the live session transcript and the saved conversations.
///
/// `SessionStore` is responsible for:
/// - Appending messages to the live session
/// - Clearing the live session
/// - Snapshotting the live session into named conversations
///
/// Every accessor hands out owned copies, so callers can never reach into the
/// store's state. One store backs exactly one session; give each user their
/// own instance.
pub struct SessionStore {
    /// Live, unsaved transcript in insertion order
    current: Vec<Message>,
    /// Saved snapshots in save order
    conversations: Vec<Conversation>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates an empty store that reads time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            current: Vec::new(),
            conversations: Vec::new(),
            clock,
        }
    }

    /// Appends a message to the live session and returns it.
    ///
    /// # Arguments
    ///
    /// * `role` - Who sent the message
    /// * `content` - Message text
    /// * `timestamp` - Creation time; the store's clock is used when `None`
    pub fn append(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
        timestamp: Option<DateTime<Local>>,
    ) -> Message {
        let timestamp = timestamp.unwrap_or_else(|| self.clock.now());
        let message = Message::new(role, content, timestamp);
        self.current.push(message.clone());
        message
    }

    /// Returns a copy of the live session in insertion order.
    pub fn current_transcript(&self) -> Vec<Message> {
        self.current.clone()
    }

    /// Number of messages in the live session.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Empties the live session. Clearing an empty session is a no-op.
    pub fn clear(&mut self) {
        debug!(messages = self.current.len(), "clearing live session");
        self.current.clear();
    }

    /// Snapshots the live session into a new saved conversation.
    ///
    /// A missing or blank `name` is replaced by `Chat_YYYYMMDD_HHMMSS`; any
    /// other name is kept exactly as given. The live session is left as is;
    /// combine with [`SessionStore::clear`] to start fresh.
    pub fn save(&mut self, name: Option<&str>) -> Conversation {
        let now = self.clock.now();
        let name = match name {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => Conversation::default_name(now),
        };

        let conversation = Conversation::new(name, self.current.clone(), now);
        info!(
            name = conversation.name(),
            messages = conversation.messages().len(),
            "saved conversation"
        );
        self.conversations.push(conversation.clone());
        conversation
    }

    /// Returns the saved conversations in save order.
    pub fn saved_conversations(&self) -> Vec<Conversation> {
        self.conversations.clone()
    }

    /// Replaces the saved conversations with previously persisted ones.
    ///
    /// The live session is not touched.
    pub fn restore_conversations(&mut self, conversations: Vec<Conversation>) {
        info!(count = conversations.len(), "restored saved conversations");
        self.conversations = conversations;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &self.current)
            .field("conversations", &self.conversations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn fixed_store() -> (SessionStore, DateTime<Local>) {
        let at = Local.with_ymd_and_hms(2024, 5, 17, 14, 30, 5).unwrap();
        (SessionStore::new(Arc::new(FixedClock::new(at))), at)
    }

    #[test]
    fn test_new_store_is_empty() {
        let (store, _) = fixed_store();
        assert!(store.is_empty());
        assert!(store.current_transcript().is_empty());
        assert!(store.saved_conversations().is_empty());
    }

    #[test]
    fn test_append_grows_by_one_and_keeps_order() {
        let (mut store, _) = fixed_store();

        for (i, text) in ["first", "second", "third"].iter().enumerate() {
            store.append(MessageRole::User, *text, None);
            assert_eq!(store.current_transcript().len(), i + 1);
        }

        let contents: Vec<_> = store
            .current_transcript()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_append_uses_clock_unless_timestamp_given() {
        let (mut store, now) = fixed_store();
        let earlier = Local.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        let defaulted = store.append(MessageRole::User, "a", None);
        let explicit = store.append(MessageRole::Assistant, "b", Some(earlier));

        assert_eq!(defaulted.timestamp(), now);
        assert_eq!(explicit.timestamp(), earlier);
        assert_eq!(explicit.role(), MessageRole::Assistant);
    }

    #[test]
    fn test_transcript_is_a_copy() {
        let (mut store, _) = fixed_store();
        store.append(MessageRole::User, "hi", None);

        let mut copy = store.current_transcript();
        copy.clear();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (mut store, _) = fixed_store();
        store.append(MessageRole::User, "one", None);
        store.append(MessageRole::Assistant, "two", None);

        store.clear();
        assert!(store.current_transcript().is_empty());

        store.clear();
        assert!(store.current_transcript().is_empty());
    }

    #[test]
    fn test_save_does_not_touch_live_session() {
        let (mut store, _) = fixed_store();
        store.append(MessageRole::User, "hello", None);
        store.append(MessageRole::Assistant, "hi there", None);

        let before = store.current_transcript();
        let saved = store.save(Some("greetings"));
        let after = store.current_transcript();

        assert_eq!(before, after);
        assert_eq!(saved.name(), "greetings");
        assert_eq!(saved.messages(), before.as_slice());
    }

    #[test]
    fn test_save_without_name_synthesizes_timestamp_label() {
        let (mut store, _) = fixed_store();

        assert_eq!(store.save(None).name(), "Chat_20240517_143005");
        assert_eq!(store.save(Some("   ")).name(), "Chat_20240517_143005");
    }

    #[test]
    fn test_save_keeps_given_name_verbatim() {
        let (mut store, _) = fixed_store();
        store.append(MessageRole::User, "hello", None);

        assert_eq!(store.save(Some("  morning ")).name(), "  morning ");
        assert_eq!(store.saved_conversations()[0].name(), "  morning ");
    }

    #[test]
    fn test_colliding_names_produce_separate_entries() {
        let (mut store, _) = fixed_store();
        store.append(MessageRole::User, "one", None);
        store.save(None);
        store.append(MessageRole::User, "two", None);
        store.save(None);

        let saved = store.saved_conversations();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].name(), saved[1].name());
        assert_eq!(saved[0].messages().len(), 1);
        assert_eq!(saved[1].messages().len(), 2);
    }

    #[test]
    fn test_saved_conversation_is_frozen() {
        let (mut store, _) = fixed_store();
        store.append(MessageRole::User, "keep me", None);
        store.save(Some("snapshot"));

        store.append(MessageRole::User, "later", None);
        store.clear();

        let saved = store.saved_conversations();
        assert_eq!(saved[0].messages().len(), 1);
        assert_eq!(saved[0].messages()[0].content(), "keep me");
    }

    #[test]
    fn test_restore_replaces_saved_but_keeps_live_session() {
        let (mut store, at) = fixed_store();
        store.append(MessageRole::User, "live", None);
        store.save(Some("old"));

        store.restore_conversations(vec![Conversation::new("imported", Vec::new(), at)]);

        let saved = store.saved_conversations();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name(), "imported");
        assert_eq!(store.len(), 1);
    }
}
