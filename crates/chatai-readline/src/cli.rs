use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chatai")]
#[command(about = "ChatAI - a rule-based chat assistant for the terminal", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/chatai/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Conversation archive to read and write (overrides the config file)
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Seed for reply selection, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}
