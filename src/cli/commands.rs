// src/cli/commands.rs
use std::path::PathBuf;

use clap::{Args, Subcommand};
use password_master::models::GenerationConfig;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a password
    Generate {
        #[command(flatten)]
        options: GenerationArgs,
    },

    /// Generate several passwords with the same settings
    Batch {
        /// Number of passwords (1-100)
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Also write the batch to a CSV file
        #[arg(long, value_name = "file")]
        export: Option<PathBuf>,

        #[command(flatten)]
        options: GenerationArgs,
    },

    /// Analyze the strength of a password
    Analyze {
        /// Password to analyze (prompted for when omitted)
        password: Option<String>,
    },

    /// Inspect or manage the password history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List saved passwords, newest first
    List {
        /// Show passwords in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Remove a password from the history
    Remove {
        #[arg(required = true)]
        password: String,
    },

    /// Remove every entry from the history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the history to a CSV file
    Export {
        #[arg(required = true, value_name = "file")]
        path: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// Password length (4-128)
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lowercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,

    /// Exclude similar characters (0, O, 1, l, I)
    #[arg(long)]
    pub exclude_similar: bool,

    /// Exclude ambiguous punctuation such as brackets, quotes and slashes
    #[arg(long)]
    pub exclude_ambiguous: bool,
}

impl GenerationArgs {
    /// Apply the flags on top of the configured defaults.
    pub fn to_config(&self, defaults: &GenerationConfig) -> GenerationConfig {
        GenerationConfig {
            length: self.length.unwrap_or(defaults.length),
            include_uppercase: defaults.include_uppercase && !self.no_uppercase,
            include_lowercase: defaults.include_lowercase && !self.no_lowercase,
            include_digits: defaults.include_digits && !self.no_digits,
            include_symbols: defaults.include_symbols && !self.no_symbols,
            exclude_similar: defaults.exclude_similar || self.exclude_similar,
            exclude_ambiguous: defaults.exclude_ambiguous || self.exclude_ambiguous,
        }
    }
}
