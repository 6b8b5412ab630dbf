//! Intent classification.
//!
//! Inputs are matched against a fixed, priority-ordered rule table. The first
//! rule with a trigger present in the lower-cased input wins; later rules are
//! not consulted.

use regex::Regex;
use std::sync::OnceLock;

/// The classified category of a user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Farewell,
    Help,
    Identity,
    Time,
    Arithmetic,
    Default,
}

/// How a rule decides whether it applies.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Any of the phrases appears as a substring of the lower-cased input.
    AnyOf(&'static [&'static str]),
    /// The input contains `digits operator digits`.
    ArithmeticPattern,
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub trigger: Trigger,
}

impl IntentRule {
    const fn new(intent: Intent, trigger: Trigger) -> Self {
        Self { intent, trigger }
    }

    fn matches(&self, raw: &str, lowered: &str) -> bool {
        match self.trigger {
            Trigger::AnyOf(phrases) => phrases.iter().any(|p| lowered.contains(p)),
            Trigger::ArithmeticPattern => arithmetic_pattern().is_match(raw),
        }
    }
}

/// Classification rules in priority order.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule::new(Intent::Greeting, Trigger::AnyOf(&["hello", "hi", "hey", "hola"])),
    IntentRule::new(
        Intent::Farewell,
        Trigger::AnyOf(&["bye", "goodbye", "see you", "exit"]),
    ),
    IntentRule::new(
        Intent::Help,
        Trigger::AnyOf(&["help", "what can you do", "capabilities"]),
    ),
    IntentRule::new(Intent::Identity, Trigger::AnyOf(&["your name", "who are you"])),
    IntentRule::new(Intent::Time, Trigger::AnyOf(&["time"])),
    IntentRule::new(Intent::Arithmetic, Trigger::ArithmeticPattern),
];

static ARITHMETIC_PATTERN: OnceLock<Regex> = OnceLock::new();

/// `digits operator digits`, anywhere in the input.
pub(crate) fn arithmetic_pattern() -> &'static Regex {
    ARITHMETIC_PATTERN
        .get_or_init(|| Regex::new(r"\d+[+\-*/]\d+").expect("arithmetic pattern is valid"))
}

/// Returns the intent of the first matching rule, or [`Intent::Default`].
pub fn classify(input: &str) -> Intent {
    let lowered = input.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|rule| rule.matches(input, &lowered))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_fires() {
        assert_eq!(classify("Hello there"), Intent::Greeting);
        assert_eq!(classify("goodbye now"), Intent::Farewell);
        assert_eq!(classify("what can you do?"), Intent::Help);
        assert_eq!(classify("Who are you"), Intent::Identity);
        assert_eq!(classify("what TIME is it"), Intent::Time);
        assert_eq!(classify("12*4"), Intent::Arithmetic);
        assert_eq!(classify("random words"), Intent::Default);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify("HOLA"), Intent::Greeting);
        assert_eq!(classify("SEE YOU"), Intent::Farewell);
        assert_eq!(classify("CAPABILITIES"), Intent::Help);
    }

    #[test]
    fn test_greeting_beats_farewell() {
        assert_eq!(classify("hi and bye"), Intent::Greeting);
        assert_eq!(classify("bye, hey"), Intent::Greeting);
    }

    #[test]
    fn test_substring_matching_is_not_word_aware() {
        // "this" contains "hi", "exiting" contains "exit"
        assert_eq!(classify("this one"), Intent::Greeting);
        assert_eq!(classify("exiting"), Intent::Farewell);
    }

    #[test]
    fn test_identity_beats_time() {
        assert_eq!(classify("your name at the time"), Intent::Identity);
    }

    #[test]
    fn test_time_beats_arithmetic() {
        assert_eq!(classify("time for 2+2"), Intent::Time);
    }

    #[test]
    fn test_arithmetic_needs_adjacent_operands() {
        assert_eq!(classify("2 + 2"), Intent::Default);
        assert_eq!(classify("compute 10/5 please"), Intent::Arithmetic);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(classify(""), Intent::Default);
    }
}
