//! Conversation message types.
//!
//! This module contains types for representing messages in a transcript,
//! including roles and message content.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant.
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a transcript.
///
/// Fields are private: a message cannot be edited after the store creates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    content: String,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// The role of the message sender.
    pub fn role(&self) -> MessageRole {
        self.role
    }

    /// The content of the message.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the message was created.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}
