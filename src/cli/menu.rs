// src/cli/menu.rs
use std::error::Error;
use std::path::PathBuf;

use inquire::{Confirm, InquireError, Select, Text};

use password_master::core::PasswordHistory;
use password_master::generators::MAX_BATCH_SIZE;
use password_master::models::{GenerationConfig, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

use crate::cli::handlers;

const GENERATE: &str = "🔐  Generate password";
const BATCH: &str = "📦  Generate batch";
const ANALYZE: &str = "🔍  Analyze a password";
const HISTORY: &str = "📜  View history";
const REMOVE: &str = "🗑️  Remove from history";
const CLEAR: &str = "🧹  Clear history";
const EXPORT: &str = "📤  Export history to CSV";
const EXIT: &str = "❌  Exit";

pub fn run_cli_menu(history: &mut PasswordHistory, defaults: &GenerationConfig) -> Result<(), Box<dyn Error>> {
    println!("╔══════════════════════════════════════╗");
    println!("║        🔑 PASSWORD MASTER            ║");
    println!("╚══════════════════════════════════════╝");

    loop {
        let options = vec![GENERATE, BATCH, ANALYZE, HISTORY, REMOVE, CLEAR, EXPORT, EXIT];

        let selection = match Select::new("Choose an option:", options)
            .with_help_message("Use arrow keys to navigate, Enter to select. Esc or Ctrl+C to exit.")
            .with_page_size(10)
            .prompt_skippable()
        {
            Ok(Some(selection)) => selection,
            Ok(None) | Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(Box::new(e)),
        };

        let result = match selection {
            GENERATE => ask_generation_config(defaults)
                .and_then(|config| handlers::handle_generate(history, &config, false).map(|_| ())),
            BATCH => ask_batch(history, defaults),
            ANALYZE => handlers::handle_analyze(None, false).map(|_| ()),
            HISTORY => handlers::handle_history_list(history, true, false),
            REMOVE => ask_remove(history),
            CLEAR => handlers::handle_history_clear(history, false).map(|_| ()),
            EXPORT => ask_export(history),
            _ => break,
        };

        match result {
            Ok(()) => {}
            Err(e) if is_interrupt(e.as_ref()) => break,
            Err(e) => {
                log::warn!("Menu action failed: {}", e);
                println!("❌ {}", e);
            }
        }

        println!();
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn ask_generation_config(defaults: &GenerationConfig) -> Result<GenerationConfig, Box<dyn Error>> {
    let length = ask_number(
        &format!("Password length ({}-{}):", MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH),
        defaults.length,
    )?;

    let include_uppercase = Confirm::new("Include uppercase letters?")
        .with_default(defaults.include_uppercase)
        .prompt()?;

    let include_lowercase = Confirm::new("Include lowercase letters?")
        .with_default(defaults.include_lowercase)
        .prompt()?;

    let include_digits = Confirm::new("Include digits?")
        .with_default(defaults.include_digits)
        .prompt()?;

    let include_symbols = Confirm::new("Include symbols?")
        .with_default(defaults.include_symbols)
        .prompt()?;

    let exclude_similar = Confirm::new("Exclude similar characters (0, O, 1, l, I)?")
        .with_default(defaults.exclude_similar)
        .prompt()?;

    let exclude_ambiguous = Confirm::new("Exclude ambiguous punctuation ({ } [ ] ( ) / \\ ' \" ` ~ , ; . < >)?")
        .with_default(defaults.exclude_ambiguous)
        .prompt()?;

    Ok(GenerationConfig {
        length,
        include_uppercase,
        include_lowercase,
        include_digits,
        include_symbols,
        exclude_similar,
        exclude_ambiguous,
    })
}

fn ask_batch(history: &mut PasswordHistory, defaults: &GenerationConfig) -> Result<(), Box<dyn Error>> {
    let count = ask_number(&format!("How many passwords (1-{})?", MAX_BATCH_SIZE), 5)?;
    let config = ask_generation_config(defaults)?;

    let export = Text::new("Export to CSV file (leave empty to skip):").prompt()?;
    let export = if export.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(export.trim()))
    };

    handlers::handle_batch(history, &config, count, export.as_deref(), false)?;
    Ok(())
}

fn ask_remove(history: &mut PasswordHistory) -> Result<(), Box<dyn Error>> {
    if history.is_empty() {
        println!("📭 No passwords in history.");
        return Ok(());
    }

    let passwords: Vec<String> = history.entries().iter().map(|e| e.password.clone()).collect();
    let selection = Select::new("Select password to remove:", passwords)
        .with_page_size(15)
        .prompt()?;

    handlers::handle_history_remove(history, &selection)?;
    Ok(())
}

fn ask_export(history: &PasswordHistory) -> Result<(), Box<dyn Error>> {
    let path = Text::new("Export to:")
        .with_default("password-history.csv")
        .prompt()?;

    handlers::handle_history_export(history, PathBuf::from(path.trim()).as_path())?;
    Ok(())
}

fn ask_number(message: &str, default: usize) -> Result<usize, InquireError> {
    Text::new(message)
        .with_default(&default.to_string())
        .prompt()
        .and_then(|s| {
            s.trim()
                .parse()
                .map_err(|_| InquireError::Custom("Invalid number".into()))
        })
}

fn is_interrupt(error: &(dyn Error + 'static)) -> bool {
    matches!(
        error.downcast_ref::<InquireError>(),
        Some(InquireError::OperationInterrupted)
    )
}
