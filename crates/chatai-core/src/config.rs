use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub replies: ReplyBook,
    pub storage: StorageConfig,
    pub dispatcher: DispatcherConfig,
}

impl ChatConfig {
    /// Rejects configurations the dispatcher cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.replies.validate()
    }
}

/// Reply sets the dispatcher picks from, plus its fixed strings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReplyBook {
    pub greeting: Vec<String>,
    pub farewell: Vec<String>,
    pub help: Vec<String>,
    pub default: Vec<String>,
    pub identity: String,
    pub calculation_failure: String,
}

impl ReplyBook {
    pub fn validate(&self) -> Result<()> {
        let sets = [
            ("greeting", &self.greeting),
            ("farewell", &self.farewell),
            ("help", &self.help),
            ("default", &self.default),
        ];
        for (name, set) in sets {
            if set.is_empty() {
                return Err(ChatError::config(format!("{name} replies must not be empty")));
            }
        }
        Ok(())
    }
}

impl Default for ReplyBook {
    fn default() -> Self {
        fn owned(lines: &[&str]) -> Vec<String> {
            lines.iter().map(|s| s.to_string()).collect()
        }

        Self {
            greeting: owned(&[
                "Hello! How can I assist you today?",
                "Hi there! What can I help you with?",
                "Hey! Nice to see you. How can I help?",
            ]),
            farewell: owned(&[
                "Goodbye! Have a great day!",
                "See you later! Feel free to come back anytime.",
                "Bye! It was nice chatting with you.",
            ]),
            help: owned(&[
                "I can help you with various tasks. You can ask me about weather, time, calculations, or just chat!",
                "I'm here to assist you with information and conversations. What do you need help with?",
                "I can answer questions, help with calculations, or just have a friendly chat!",
            ]),
            default: owned(&[
                "I'm not sure I understand. Could you rephrase that?",
                "That's interesting! Could you tell me more?",
                "I'm still learning. Could you explain that differently?",
            ]),
            identity: "I'm a modern chatbot assistant! You can call me ChatAI.".to_string(),
            calculation_failure: "I couldn't calculate that. Please check your math expression."
                .to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Where saved conversations are archived; platform data dir when unset.
    pub data_file: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Fixed seed for reply selection; entropy-seeded when unset.
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_book_is_valid() {
        let config = ChatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.replies.greeting.len(), 3);
        assert!(config.replies.identity.contains("ChatAI"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ChatConfig = toml::from_str(
            r#"
[replies]
greeting = ["Yo!"]

[dispatcher]
seed = 7
"#,
        )
        .unwrap();

        assert_eq!(config.replies.greeting, vec!["Yo!".to_string()]);
        assert_eq!(config.replies.farewell, ReplyBook::default().farewell);
        assert_eq!(config.dispatcher.seed, Some(7));
        assert!(config.storage.data_file.is_none());
    }

    #[test]
    fn test_empty_reply_set_is_rejected() {
        let mut config = ChatConfig::default();
        config.replies.help.clear();

        let err = config.validate().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("help"));
    }
}
