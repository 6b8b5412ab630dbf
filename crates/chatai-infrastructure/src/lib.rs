pub mod config_storage;
pub mod dto;
pub mod json_conversation_repository;
pub mod paths;
pub mod storage;

pub use config_storage::{load_config, load_default_config};
pub use json_conversation_repository::JsonConversationRepository;
pub use paths::ChatPaths;
