//! JSON-file-backed conversation repository.

use crate::dto::ConversationArchiveDto;
use crate::paths::ChatPaths;
use crate::storage::AtomicJsonFile;
use chatai_core::clock::{Clock, SystemClock};
use chatai_core::session::{Conversation, ConversationRepository};
use chatai_core::{ChatError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Stores the saved conversation collection in a single JSON archive.
///
/// # Storage Format
///
/// ```json
/// {
///   "schemaVersion": "1.0.0",
///   "conversations": [{ "name": "...", "messages": [...], "createdAt": "..." }],
///   "exportedAt": "2024-06-01T10:00:00+02:00"
/// }
/// ```
pub struct JsonConversationRepository {
    file: AtomicJsonFile<ConversationArchiveDto>,
    clock: Arc<dyn Clock>,
}

impl JsonConversationRepository {
    /// Creates a repository backed by the archive at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Same as [`JsonConversationRepository::new`] with an explicit clock for
    /// the `exportedAt` stamp.
    pub fn with_clock(path: PathBuf, clock: Arc<dyn Clock>) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            clock,
        }
    }

    /// Repository at the platform default location.
    pub fn default_location() -> Result<Self> {
        let path = ChatPaths::conversations_file().map_err(|e| ChatError::io(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl ConversationRepository for JsonConversationRepository {
    fn load_all(&self) -> Result<Vec<Conversation>> {
        match self.file.load()? {
            Some(archive) => {
                let conversations = archive.into_domain();
                info!(
                    path = %self.path().display(),
                    count = conversations.len(),
                    "imported conversation archive"
                );
                Ok(conversations)
            }
            None => {
                info!(path = %self.path().display(), "no previous archive found, starting fresh");
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, conversations: &[Conversation]) -> Result<()> {
        let archive = ConversationArchiveDto::from_domain(conversations, self.clock.now());
        self.file.save(&archive)?;
        info!(
            path = %self.path().display(),
            count = conversations.len(),
            "exported conversation archive"
        );
        Ok(())
    }
}
