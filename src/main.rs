use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use password_master::core::{Config, PasswordHistory};

mod cli;

use crate::cli::handlers;
use crate::cli::{Args, CliCommand, HistoryCommand};

fn main() {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let config = Config::load();

    if let Err(e) = init_logging(&config) {
        eprintln!("⚠️ Failed to open log file: {}", e);
    }
    log::debug!("Command line args: {:?}", args);
    log::debug!("Loaded config: {:?}", config);

    if let Err(e) = run(args, &config) {
        log::error!("{}", e);
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

fn init_logging(config: &Config) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .parse_default_env()
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false);

    let result = match &config.log_file {
        Some(path) => File::create(path).map(|file| {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }),
        None => Ok(()),
    };

    builder.init();
    result
}

// Where the history lives for this run, or `None` when it is disabled.
fn history_path(args: &Args, config: &Config) -> Option<PathBuf> {
    if args.no_history || !config.history_enabled {
        log::info!("History disabled; generated passwords will not be saved");
        return None;
    }

    Some(
        args.history_file
            .clone()
            .unwrap_or_else(|| config.history_path()),
    )
}

fn open_history(args: &Args, config: &Config) -> Result<PasswordHistory, Box<dyn Error>> {
    match history_path(args, config) {
        Some(path) => Ok(PasswordHistory::load(path)?),
        None => Ok(PasswordHistory::in_memory()),
    }
}

fn run(mut args: Args, config: &Config) -> Result<(), Box<dyn Error>> {
    let defaults = config.generation_defaults();

    match args.command.take() {
        Some(CliCommand::Generate { options }) => {
            let mut history = open_history(&args, config)?;
            handlers::handle_generate(&mut history, &options.to_config(&defaults), args.json)?;
        }
        Some(CliCommand::Batch {
            count,
            export,
            options,
        }) => {
            let mut history = open_history(&args, config)?;
            handlers::handle_batch(
                &mut history,
                &options.to_config(&defaults),
                count,
                export.as_deref(),
                args.json,
            )?;
        }
        Some(CliCommand::Analyze { password }) => {
            handlers::handle_analyze(password, args.json)?;
        }
        Some(CliCommand::History {
            command: HistoryCommand::Clear { yes },
        }) => {
            // Clearing must work even when the stored file is unreadable
            let mut history = match history_path(&args, config) {
                Some(path) => PasswordHistory::load_or_empty(path)?,
                None => PasswordHistory::in_memory(),
            };
            handlers::handle_history_clear(&mut history, yes)?;
        }
        Some(CliCommand::History { command }) => {
            let mut history = open_history(&args, config)?;
            match command {
                HistoryCommand::List { reveal } => handlers::handle_history_list(&history, reveal, args.json)?,
                HistoryCommand::Remove { password } => {
                    handlers::handle_history_remove(&mut history, &password)?;
                }
                HistoryCommand::Export { path } => {
                    handlers::handle_history_export(&history, &path)?;
                }
                HistoryCommand::Clear { yes } => {
                    handlers::handle_history_clear(&mut history, yes)?;
                }
            }
        }
        None => {
            let mut history = open_history(&args, config)?;
            cli::menu::run_cli_menu(&mut history, &defaults)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::GenerationArgs;
    use std::fs;
    use tempfile::tempdir;

    fn args_with(history_file: PathBuf, command: CliCommand) -> Args {
        Args {
            json: true,
            history_file: Some(history_file),
            no_history: false,
            command: Some(command),
        }
    }

    #[test]
    fn analyze_ignores_unreadable_history() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "garbage").unwrap();

        let args = args_with(
            path.clone(),
            CliCommand::Analyze {
                password: Some("abc".to_string()),
            },
        );
        assert!(run(args, &Config::default()).is_ok());
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage");
    }

    #[test]
    fn clear_replaces_unreadable_history() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "garbage").unwrap();

        let args = args_with(
            path.clone(),
            CliCommand::History {
                command: HistoryCommand::Clear { yes: true },
            },
        );
        assert!(run(args, &Config::default()).is_ok());
        assert!(PasswordHistory::load(path).unwrap().is_empty());
    }

    #[test]
    fn generate_refuses_to_overwrite_unreadable_history() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "garbage").unwrap();

        let args = args_with(
            path.clone(),
            CliCommand::Generate {
                options: GenerationArgs::default(),
            },
        );
        assert!(run(args, &Config::default()).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage");
    }
}
