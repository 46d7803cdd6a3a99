// src/core/config.rs
use std::env;
use std::path::PathBuf;

use log::LevelFilter;

use crate::models::GenerationConfig;

const DEFAULT_HISTORY_FILE: &str = "history.json";
const FALLBACK_HISTORY_FILE: &str = "./password_history.json";

// Configuration for the generator front end
#[derive(Debug, Clone)]
pub struct Config {
    // Password Generation
    pub default_password_length: usize,
    pub default_exclude_similar: bool,
    pub default_exclude_ambiguous: bool,

    // History
    pub history_enabled: bool,
    /// Explicit history location; `None` means the per-user default.
    pub history_file: Option<PathBuf>,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Password Generation
            default_password_length: 16,
            default_exclude_similar: false,
            default_exclude_ambiguous: false,

            // History
            history_enabled: true,
            history_file: None,

            // Logging
            log_level: LevelFilter::Warn,
            log_file: None,
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        let mut config = Config::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Password Generation
        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.parse() {
                Ok(length) => self.default_password_length = length,
                Err(_) => log::warn!("Ignoring invalid DEFAULT_PASSWORD_LENGTH '{}'", val),
            }
        }

        if let Some(val) = lookup("DEFAULT_EXCLUDE_SIMILAR") {
            if let Ok(exclude) = val.parse() {
                self.default_exclude_similar = exclude;
            }
        }

        if let Some(val) = lookup("DEFAULT_EXCLUDE_AMBIGUOUS") {
            if let Ok(exclude) = val.parse() {
                self.default_exclude_ambiguous = exclude;
            }
        }

        // History
        if let Some(val) = lookup("HISTORY_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.history_enabled = enabled;
            }
        }

        if let Some(file) = lookup("HISTORY_FILE") {
            if !file.trim().is_empty() {
                self.history_file = Some(PathBuf::from(file));
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => self.log_level = LevelFilter::Off,
                "error" => self.log_level = LevelFilter::Error,
                "warn" => self.log_level = LevelFilter::Warn,
                "info" => self.log_level = LevelFilter::Info,
                "debug" => self.log_level = LevelFilter::Debug,
                "trace" => self.log_level = LevelFilter::Trace,
                _ => {}
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            if !file.trim().is_empty() {
                self.log_file = Some(PathBuf::from(file));
            }
        }
    }

    /// Where the history is kept. Without an explicit file this resolves the
    /// app config directory, creating it, and only then.
    pub fn history_path(&self) -> PathBuf {
        if let Some(file) = &self.history_file {
            return file.clone();
        }

        // History lives next to the rest of the app's config when possible
        crate::utils::get_app_config_dir()
            .map(|dir| dir.join(DEFAULT_HISTORY_FILE))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_HISTORY_FILE))
    }

    /// Generation settings used when the caller does not override them.
    pub fn generation_defaults(&self) -> GenerationConfig {
        GenerationConfig {
            length: self.default_password_length,
            exclude_similar: self.default_exclude_similar,
            exclude_ambiguous: self.default_exclude_ambiguous,
            ..GenerationConfig::default()
        }
    }
}
