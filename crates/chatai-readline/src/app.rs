use chatai_core::Result;
use chatai_core::session::{Conversation, ConversationRepository, Message};
use chatai_interaction::{IntentDispatcher, ProcessOutcome};
use tracing::warn;

use crate::commands::SlashCommand;

/// How many saved conversations `/saved` lists.
pub const RECENT_SAVED_LIMIT: usize = 5;

/// What the front end should render after handling a line.
#[derive(Debug)]
pub enum AppEvent {
    /// Blank input; nothing to show.
    Skipped,
    Reply(ProcessOutcome),
    Cleared,
    Saved(Conversation),
    History(Vec<Message>),
    SavedList {
        recent: Vec<Conversation>,
        total: usize,
    },
    Commands,
    UnknownCommand(String),
    Quit,
}

/// Ties the dispatcher to the conversation archive.
///
/// Saved conversations are imported on construction and exported after every
/// `/save`. A failed export is retried on [`ChatApp::shutdown`].
pub struct ChatApp {
    dispatcher: IntentDispatcher,
    repository: Box<dyn ConversationRepository>,
    unexported: bool,
}

impl ChatApp {
    /// Builds the app and restores previously saved conversations.
    pub fn new(
        mut dispatcher: IntentDispatcher,
        repository: Box<dyn ConversationRepository>,
    ) -> Result<Self> {
        let conversations = repository.load_all()?;
        dispatcher.store_mut().restore_conversations(conversations);

        Ok(Self {
            dispatcher,
            repository,
            unexported: false,
        })
    }

    pub fn dispatcher(&self) -> &IntentDispatcher {
        &self.dispatcher
    }

    /// Handles one line from the terminal.
    ///
    /// # Errors
    ///
    /// Only `/save` can fail, when the archive cannot be written. The
    /// conversation stays saved in memory in that case.
    pub fn handle_line(&mut self, line: &str) -> Result<AppEvent> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(AppEvent::Skipped);
        }

        let Some(command) = SlashCommand::parse(trimmed) else {
            return Ok(AppEvent::Reply(self.dispatcher.process(line)));
        };

        let event = match command {
            SlashCommand::Clear => {
                self.dispatcher.store_mut().clear();
                AppEvent::Cleared
            }
            SlashCommand::Save(name) => {
                let conversation = self.dispatcher.store_mut().save(name.as_deref());
                self.unexported = true;
                self.export()?;
                AppEvent::Saved(conversation)
            }
            SlashCommand::History => {
                AppEvent::History(self.dispatcher.store().current_transcript())
            }
            SlashCommand::Saved => {
                let saved = self.dispatcher.store().saved_conversations();
                let total = saved.len();
                let recent = saved[total.saturating_sub(RECENT_SAVED_LIMIT)..].to_vec();
                AppEvent::SavedList { recent, total }
            }
            SlashCommand::Commands => AppEvent::Commands,
            SlashCommand::Quit => AppEvent::Quit,
            SlashCommand::Unknown(name) => AppEvent::UnknownCommand(name),
        };
        Ok(event)
    }

    fn export(&mut self) -> Result<()> {
        let conversations = self.dispatcher.store().saved_conversations();
        self.repository.save_all(&conversations)?;
        self.unexported = false;
        Ok(())
    }

    /// Writes any saved conversations a failed `/save` could not export.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.unexported {
            warn!("retrying archive export on exit");
            self.export()?;
        }
        Ok(())
    }
}
