//! Archive DTOs (anti-corruption layer between disk format and domain types).

use chatai_core::session::{Conversation, Message, MessageRole};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Schema version written into every archive.
pub const ARCHIVE_SCHEMA_VERSION: &str = "1.0.0";

fn default_schema_version() -> String {
    ARCHIVE_SCHEMA_VERSION.to_string()
}

/// On-disk archive of saved conversations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationArchiveDto {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub conversations: Vec<ConversationDto>,
    #[serde(alias = "exported_at")]
    pub exported_at: DateTime<Local>,
}

impl ConversationArchiveDto {
    pub fn from_domain(conversations: &[Conversation], exported_at: DateTime<Local>) -> Self {
        Self {
            schema_version: default_schema_version(),
            conversations: conversations.iter().map(ConversationDto::from).collect(),
            exported_at,
        }
    }

    pub fn into_domain(self) -> Vec<Conversation> {
        self.conversations.into_iter().map(Conversation::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub name: String,
    #[serde(default)]
    pub messages: Vec<MessageDto>,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDto {
    pub role: MessageRoleDto,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRoleDto {
    User,
    Assistant,
}

impl From<MessageRole> for MessageRoleDto {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => Self::User,
            MessageRole::Assistant => Self::Assistant,
        }
    }
}

impl From<MessageRoleDto> for MessageRole {
    fn from(role: MessageRoleDto) -> Self {
        match role {
            MessageRoleDto::User => Self::User,
            MessageRoleDto::Assistant => Self::Assistant,
        }
    }
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role().into(),
            content: message.content().to_string(),
            timestamp: message.timestamp(),
        }
    }
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        Message::new(dto.role.into(), dto.content, dto.timestamp)
    }
}

impl From<&Conversation> for ConversationDto {
    fn from(conversation: &Conversation) -> Self {
        Self {
            name: conversation.name().to_string(),
            messages: conversation.messages().iter().map(MessageDto::from).collect(),
            created_at: conversation.created_at(),
        }
    }
}

impl From<ConversationDto> for Conversation {
    fn from(dto: ConversationDto) -> Self {
        let messages = dto.messages.into_iter().map(Message::from).collect();
        Conversation::new(dto.name, messages, dto.created_at)
    }
}
