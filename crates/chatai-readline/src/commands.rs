//! Slash commands understood by the REPL.
//!
//! Lines starting with `/` are front-end commands; everything else is handed to
//! the dispatcher.

/// A slash command available in the REPL.
#[derive(Debug, Clone, Copy)]
pub struct SlashCommandInfo {
    /// Command name (without the leading /)
    pub name: &'static str,
    /// Usage format (e.g., "/save [name]")
    pub usage: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

impl SlashCommandInfo {
    const fn new(name: &'static str, usage: &'static str, description: &'static str) -> Self {
        Self {
            name,
            usage,
            description,
        }
    }
}

pub const SLASH_COMMANDS: &[SlashCommandInfo] = &[
    SlashCommandInfo::new("clear", "/clear", "Clear the current conversation"),
    SlashCommandInfo::new(
        "save",
        "/save [name]",
        "Save the current conversation (named Chat_<timestamp> if no name is given)",
    ),
    SlashCommandInfo::new("history", "/history", "Show the current conversation"),
    SlashCommandInfo::new("saved", "/saved", "List the most recent saved conversations"),
    SlashCommandInfo::new("commands", "/commands", "Show available commands"),
    SlashCommandInfo::new("quit", "/quit", "Exit chatai"),
];

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Save(Option<String>),
    History,
    Saved,
    Commands,
    Quit,
    Unknown(String),
}

impl SlashCommand {
    /// Parses `line` as a slash command; `None` if it is ordinary chat input.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix('/')?;
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "clear" => Self::Clear,
            "save" => Self::Save((!args.is_empty()).then(|| args.to_string())),
            "history" => Self::History,
            "saved" => Self::Saved,
            "commands" => Self::Commands,
            "quit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        };
        Some(command)
    }
}
