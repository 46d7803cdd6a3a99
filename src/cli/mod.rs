// src/cli/mod.rs
use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod handlers;
pub mod menu;

pub use commands::{CliCommand, HistoryCommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// History file location (overrides HISTORY_FILE)
    #[arg(long, global = true, value_name = "file")]
    pub history_file: Option<PathBuf>,

    /// Do not read or write the password history
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Command to execute; starts the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}
