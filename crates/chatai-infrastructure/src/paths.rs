//! Unified path management for chatai files.
//!
//! ```text
//! ~/.config/chatai/              # Config directory
//! └── config.toml                # Reply book, storage and dispatcher settings
//!
//! ~/.local/share/chatai/         # Data directory
//! └── conversations.json         # Saved conversation archive
//! ```
//!
//! Platform equivalents are resolved through `dirs`.

use std::path::PathBuf;

const APP_DIR: &str = "chatai";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct ChatPaths;

impl ChatPaths {
    /// Returns the chatai configuration directory (e.g., `~/.config/chatai/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the chatai data directory (e.g., `~/.local/share/chatai/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the saved conversation archive.
    pub fn conversations_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("conversations.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_app_dirs() {
        // Headless CI may lack a home directory; only check when resolvable.
        if let (Ok(config_dir), Ok(config_file)) =
            (ChatPaths::config_dir(), ChatPaths::config_file())
        {
            assert!(config_dir.ends_with("chatai"));
            assert_eq!(config_file.parent(), Some(config_dir.as_path()));
        }
        if let Ok(archive) = ChatPaths::conversations_file() {
            assert!(archive.ends_with("chatai/conversations.json"));
        }
    }
}
