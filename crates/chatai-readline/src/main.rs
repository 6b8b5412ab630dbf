use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use chatai_core::clock::SystemClock;
use chatai_core::session::{Message, MessageRole};
use chatai_infrastructure::{JsonConversationRepository, load_config, load_default_config};
use chatai_interaction::{IntentDispatcher, ReplyPicker, RngPicker};

mod app;
mod cli;
mod commands;
mod helper;

use app::{AppEvent, ChatApp};
use cli::Cli;
use commands::SLASH_COMMANDS;
use helper::CliHelper;

/// Logs go to stderr so they never interleave with the chat on stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_app(cli: Cli) -> Result<ChatApp> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default_config()?,
    };

    let picker: Box<dyn ReplyPicker> = match cli.seed.or(config.dispatcher.seed) {
        Some(seed) => Box::new(RngPicker::seeded(seed)),
        None => Box::new(RngPicker::from_entropy()),
    };
    let dispatcher = IntentDispatcher::new(config.replies, picker, Arc::new(SystemClock))?;

    let repository = match cli.data_file.or(config.storage.data_file) {
        Some(path) => JsonConversationRepository::new(path),
        None => JsonConversationRepository::default_location()?,
    };
    tracing::debug!(archive = %repository.path().display(), "using conversation archive");

    Ok(ChatApp::new(dispatcher, Box::new(repository))?)
}

fn print_message(message: &Message) {
    let stamp = message.timestamp().format("%H:%M:%S").to_string();
    match message.role() {
        MessageRole::User => {
            println!("{} {}", stamp.bright_black(), format!("> {}", message.content()).green())
        }
        MessageRole::Assistant => {
            println!("{} {}", stamp.bright_black(), "[ChatAI]".bright_magenta());
            for line in message.content().lines() {
                println!("{}", line.bright_blue());
            }
        }
    }
}

/// Renders an event; returns `false` when the REPL should stop.
fn render(event: AppEvent) -> bool {
    match event {
        AppEvent::Skipped => {}
        AppEvent::Reply(outcome) => {
            for line in outcome.reply_message.content().lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
        AppEvent::Cleared => println!("{}", "Conversation cleared.".yellow()),
        AppEvent::Saved(conversation) => println!(
            "{}",
            format!(
                "Conversation saved as: {} ({} messages)",
                conversation.name(),
                conversation.messages().len()
            )
            .bright_green()
        ),
        AppEvent::History(messages) => {
            if messages.is_empty() {
                println!("{}", "No messages yet.".bright_black());
            }
            for message in &messages {
                print_message(message);
            }
        }
        AppEvent::SavedList { recent, total } => {
            if recent.is_empty() {
                println!("{}", "No saved conversations yet.".bright_black());
            } else {
                println!(
                    "{}",
                    format!("Saved chats (showing {} of {}):", recent.len(), total).bright_yellow()
                );
                for conversation in &recent {
                    println!(
                        "  {} {}",
                        conversation.name().bold(),
                        format!(
                            "- {} messages, created {}",
                            conversation.messages().len(),
                            conversation.created_at().format("%Y-%m-%d %H:%M")
                        )
                        .bright_black()
                    );
                }
            }
        }
        AppEvent::Commands => {
            for cmd in SLASH_COMMANDS {
                println!("  {} {}", format!("{:<14}", cmd.usage).bright_cyan(), cmd.description);
            }
        }
        AppEvent::UnknownCommand(name) => println!(
            "{}",
            format!("Unknown command: /{}. Type /commands for a list.", name).yellow()
        ),
        AppEvent::Quit => {
            println!("{}", "Goodbye!".bright_green());
            return false;
        }
    }
    true
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut app = build_app(cli)?;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== ChatAI ===".bright_magenta().bold());
    println!(
        "{}",
        "Say hello, ask for the time or some math. Type /commands for commands, /quit to exit."
            .bright_black()
    );
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match app.handle_line(&line) {
                    Ok(event) => {
                        if !render(event) {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    app.shutdown()?;
    Ok(())
}
