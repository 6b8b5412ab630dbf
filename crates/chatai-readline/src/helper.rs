use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::{SLASH_COMMANDS, SlashCommand, SlashCommandInfo};

/// rustyline helper: slash command completion, usage hints and highlighting.
#[derive(Clone, Default)]
pub struct CliHelper;

impl CliHelper {
    fn matching(prefix: &str) -> impl Iterator<Item = &'static SlashCommandInfo> + '_ {
        let name = prefix.strip_prefix('/').unwrap_or("");
        SLASH_COMMANDS.iter().filter(move |cmd| cmd.name.starts_with(name))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = Self::matching(line)
            .map(|cmd| Pair {
                display: cmd.usage.to_string(),
                replacement: format!("/{}", cmd.name),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match SlashCommand::parse(line) {
            Some(SlashCommand::Unknown(_)) => Owned(line.red().to_string()),
            Some(_) => Owned(line.bright_cyan().to_string()),
            None => Borrowed(line),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    /// Completes the command name and shows its arguments, e.g. `/sa` hints `ve [name]`.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }

        let mut matches = Self::matching(line);
        let only = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        only.usage.get(line.len()..).map(str::to_string)
    }
}

impl Validator for CliHelper {}
