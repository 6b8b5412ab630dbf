//! Saved conversation snapshots.

use super::message::Message;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Prefix of synthesized conversation names.
pub const DEFAULT_NAME_PREFIX: &str = "Chat_";

/// strftime pattern appended to [`DEFAULT_NAME_PREFIX`].
pub const DEFAULT_NAME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A named snapshot of a past session.
///
/// The messages are a copy taken at save time and are never modified
/// afterwards. Names are labels, not keys; two conversations may share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    name: String,
    messages: Vec<Message>,
    created_at: DateTime<Local>,
}

impl Conversation {
    pub fn new(
        name: impl Into<String>,
        messages: Vec<Message>,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            name: name.into(),
            messages,
            created_at,
        }
    }

    /// Builds the `Chat_YYYYMMDD_HHMMSS` label used when no name is given.
    pub fn default_name(at: DateTime<Local>) -> String {
        format!("{}{}", DEFAULT_NAME_PREFIX, at.format(DEFAULT_NAME_FORMAT))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}
