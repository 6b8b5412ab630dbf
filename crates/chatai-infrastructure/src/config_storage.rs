use crate::paths::ChatPaths;
use chatai_core::config::ChatConfig;
use chatai_core::{ChatError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads the configuration from `~/.config/chatai/config.toml`.
///
/// Falls back to defaults when the config directory cannot be resolved.
pub fn load_default_config() -> Result<ChatConfig> {
    match ChatPaths::config_file() {
        Ok(path) => load_config(&path),
        Err(_) => Ok(ChatConfig::default()),
    }
}

/// Loads and validates the configuration at `path`.
///
/// # Returns
///
/// - `Ok(ChatConfig)`: parsed config, or defaults if the file is missing or blank
/// - `Err(ChatError::Serialization)`: the file is not valid TOML for `ChatConfig`
/// - `Err(ChatError::Config)`: the file parsed but a reply set is empty
pub fn load_config(path: &Path) -> Result<ChatConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ChatConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ChatError::io(format!("Failed to read config file at {:?}: {}", path, e)))?;

    if content.trim().is_empty() {
        return Ok(ChatConfig::default());
    }

    let config: ChatConfig = toml::from_str(&content)?;
    config.validate()?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}
