use crate::arithmetic;
use crate::intent::{self, Intent};
use crate::picker::{self, ReplyPicker, RngPicker};
use chatai_core::clock::{Clock, SystemClock};
use chatai_core::config::ReplyBook;
use chatai_core::session::{Message, MessageRole, SessionStore};
use chatai_core::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of handling one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// The user's message as recorded in the session.
    pub user_message: Message,
    /// The assistant's reply as recorded in the session.
    pub reply_message: Message,
    /// Full transcript after both appends.
    pub transcript: Vec<Message>,
    /// Which rule produced the reply.
    pub intent: Intent,
}

/// Classifies user input and records the exchange in its session store.
///
/// The `IntentDispatcher` handles:
/// - Rule-based intent classification
/// - Reply selection from the configured reply book
/// - Appending both sides of the exchange to the owned [`SessionStore`]
///
/// Each call to [`IntentDispatcher::process`] is independent of earlier turns.
pub struct IntentDispatcher {
    store: SessionStore,
    replies: ReplyBook,
    picker: Box<dyn ReplyPicker>,
    clock: Arc<dyn Clock>,
}

impl IntentDispatcher {
    /// Creates a dispatcher with an empty session store.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any reply set in `replies` is empty.
    pub fn new(
        replies: ReplyBook,
        picker: Box<dyn ReplyPicker>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        replies.validate()?;
        Ok(Self {
            store: SessionStore::new(clock.clone()),
            replies,
            picker,
            clock,
        })
    }

    /// Dispatcher with the default reply book, system clock and an
    /// entropy-seeded picker.
    pub fn with_defaults() -> Self {
        Self {
            store: SessionStore::default(),
            replies: ReplyBook::default(),
            picker: Box::new(RngPicker::from_entropy()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Handles one line of input.
    ///
    /// The user message is appended first, then the reply. Never fails.
    pub fn process(&mut self, input: &str) -> ProcessOutcome {
        let user_message = self.store.append(MessageRole::User, input, None);

        let intent = intent::classify(input);
        debug!(?intent, len = input.len(), "classified input");
        let reply = self.reply_for(intent, input);

        let reply_message = self.store.append(MessageRole::Assistant, reply, None);

        ProcessOutcome {
            user_message,
            reply_message,
            transcript: self.store.current_transcript(),
            intent,
        }
    }

    fn reply_for(&mut self, intent: Intent, input: &str) -> String {
        match intent {
            Intent::Greeting => self.pick(|book| &book.greeting),
            Intent::Farewell => self.pick(|book| &book.farewell),
            Intent::Help => self.pick(|book| &book.help),
            Intent::Identity => self.replies.identity.clone(),
            Intent::Time => format!(
                "The current time is {}",
                self.clock.now().format("%H:%M:%S")
            ),
            Intent::Arithmetic => match arithmetic::calculate(input) {
                Ok(result) => format!("The answer is: {result}"),
                Err(err) => {
                    warn!(error = %err, "arithmetic evaluation failed");
                    self.replies.calculation_failure.clone()
                }
            },
            Intent::Default => self.pick(|book| &book.default),
        }
    }

    fn pick(&mut self, set: impl FnOnce(&ReplyBook) -> &Vec<String>) -> String {
        picker::choose(self.picker.as_mut(), set(&self.replies)).to_string()
    }

    /// Read access to the session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Lifecycle access to the session store (clear, save, restore).
    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatai_core::clock::FixedClock;
    use chrono::{Local, TimeZone};

    /// Always picks the last option.
    struct LastPicker;

    impl ReplyPicker for LastPicker {
        fn pick(&mut self, len: usize) -> usize {
            len - 1
        }
    }

    fn dispatcher() -> IntentDispatcher {
        let at = Local.with_ymd_and_hms(2024, 2, 29, 23, 59, 7).unwrap();
        IntentDispatcher::new(
            ReplyBook::default(),
            Box::new(LastPicker),
            Arc::new(FixedClock::new(at)),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty_reply_set() {
        let mut book = ReplyBook::default();
        book.default.clear();

        let result = IntentDispatcher::new(book, Box::new(LastPicker), Arc::new(SystemClock));
        assert!(result.is_err());
    }

    #[test]
    fn test_with_defaults_answers_greetings() {
        let mut dispatcher = IntentDispatcher::with_defaults();
        let outcome = dispatcher.process("hello");

        assert_eq!(outcome.intent, Intent::Greeting);
        assert!(
            ReplyBook::default()
                .greeting
                .iter()
                .any(|r| r == outcome.reply_message.content())
        );
    }

    #[test]
    fn test_picker_drives_selection() {
        let mut dispatcher = dispatcher();
        let outcome = dispatcher.process("hey");

        assert_eq!(
            outcome.reply_message.content(),
            ReplyBook::default().greeting.last().unwrap()
        );
    }

    #[test]
    fn test_time_reply_uses_clock() {
        let mut dispatcher = dispatcher();
        let outcome = dispatcher.process("what time is it");

        assert_eq!(outcome.intent, Intent::Time);
        assert_eq!(outcome.reply_message.content(), "The current time is 23:59:07");
    }

    #[test]
    fn test_arithmetic_success_and_failure() {
        let mut dispatcher = dispatcher();

        let ok = dispatcher.process("compute 6*7");
        assert_eq!(ok.reply_message.content(), "The answer is: 42");

        let failed = dispatcher.process("5/0");
        assert_eq!(failed.intent, Intent::Arithmetic);
        assert_eq!(
            failed.reply_message.content(),
            ReplyBook::default().calculation_failure
        );
    }

    #[test]
    fn test_messages_are_stamped_by_clock() {
        let mut dispatcher = dispatcher();
        let outcome = dispatcher.process("anything");

        assert_eq!(
            outcome.user_message.timestamp(),
            outcome.reply_message.timestamp()
        );
        assert_eq!(outcome.user_message.role(), MessageRole::User);
        assert_eq!(outcome.reply_message.role(), MessageRole::Assistant);
    }

    #[test]
    fn test_store_lifecycle_through_dispatcher() {
        let mut dispatcher = dispatcher();
        dispatcher.process("hello");
        dispatcher.store_mut().save(Some("morning"));
        dispatcher.store_mut().clear();

        assert!(dispatcher.store().is_empty());
        assert_eq!(dispatcher.store().saved_conversations().len(), 1);

        let outcome = dispatcher.process("again");
        assert_eq!(outcome.transcript.len(), 2);
    }
}
