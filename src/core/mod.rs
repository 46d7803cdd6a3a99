// src/core/mod.rs
pub mod config;
pub mod history;

pub use config::Config;
pub use history::{HistoryError, PasswordHistory, MAX_HISTORY_ENTRIES};
