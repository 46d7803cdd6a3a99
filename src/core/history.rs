// src/core/history.rs
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{HistoryEntry, StrengthLevel};

pub const MAX_HISTORY_ENTRIES: usize = 100;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Serialize, Deserialize, Default)]
struct HistoryFile {
    entries: Vec<HistoryEntry>,
}

/// Most-recent-first list of generated passwords, unique by value.
#[derive(Debug, Default)]
pub struct PasswordHistory {
    path: Option<PathBuf>,
    entries: Vec<HistoryEntry>,
}

impl PasswordHistory {
    /// A history that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the history stored at `path`. A missing file is an empty history.
    ///
    /// Entries keep their stored order; a repeated password keeps only its
    /// first (newest) occurrence.
    pub fn load(path: PathBuf) -> Result<Self> {
        let mut entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let file: HistoryFile = serde_json::from_str(&content)?;
            file.entries
        } else {
            Vec::new()
        };

        let mut seen = HashSet::new();
        entries.retain(|e| seen.insert(e.password.clone()));
        entries.truncate(MAX_HISTORY_ENTRIES);

        debug!("Loaded {} history entries from {}", entries.len(), path.display());

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Like [`load`](Self::load), but an unreadable JSON file is replaced by
    /// an empty history bound to the same path. IO errors still fail.
    pub fn load_or_empty(path: PathBuf) -> Result<Self> {
        match Self::load(path.clone()) {
            Err(HistoryError::JsonError(e)) => {
                warn!("Ignoring unreadable history file {}: {}", path.display(), e);
                Ok(Self {
                    path: Some(path),
                    entries: Vec::new(),
                })
            }
            result => result,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, password: &str, strength: StrengthLevel) {
        self.push(HistoryEntry::new(password, Some(strength)));
    }

    /// Insert `entry` at the front, dropping any older entry with the same
    /// password and anything past the size cap.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.retain(|e| e.password != entry.password);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    pub fn remove(&mut self, password: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.password != password);
        before != self.entries.len()
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = HistoryFile {
            entries: self.entries.clone(),
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)?;

        info!("Saved {} history entries to {}", self.entries.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn newest_entry_comes_first() {
        let mut history = PasswordHistory::in_memory();
        history.record("first", StrengthLevel::Weak);
        history.record("second", StrengthLevel::Good);

        let passwords: Vec<&str> = history.entries().iter().map(|e| e.password.as_str()).collect();
        assert_eq!(passwords, vec!["second", "first"]);
    }

    #[test]
    fn duplicate_moves_to_front() {
        let mut history = PasswordHistory::in_memory();
        history.record("a", StrengthLevel::Weak);
        history.record("b", StrengthLevel::Weak);
        history.record("a", StrengthLevel::Fair);

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].password, "a");
        assert_eq!(history.entries()[0].strength, Some(StrengthLevel::Fair));
        assert_eq!(history.entries()[1].password, "b");
    }

    #[test]
    fn keeps_only_most_recent_hundred() {
        let mut history = PasswordHistory::in_memory();
        for i in 0..150 {
            history.record(&format!("pw-{}", i), StrengthLevel::Good);
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.entries()[0].password, "pw-149");
        assert_eq!(history.entries()[99].password, "pw-50");
    }

    #[test]
    fn remove_and_clear() {
        let mut history = PasswordHistory::in_memory();
        history.record("a", StrengthLevel::Weak);
        history.record("b", StrengthLevel::Weak);

        assert!(history.remove("a"));
        assert!(!history.remove("a"));
        assert_eq!(history.len(), 1);

        assert_eq!(history.clear(), 1);
        assert!(history.is_empty());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let history = PasswordHistory::load(dir.path().join("nope.json")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut history = PasswordHistory::load(path.clone()).unwrap();
        history.record("Xk9#mP2$vL7@", StrengthLevel::Strong);
        history.record("abc123", StrengthLevel::Fair);
        history.save().unwrap();

        let reloaded = PasswordHistory::load(path).unwrap();
        assert_eq!(reloaded.entries(), history.entries());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            PasswordHistory::load(path),
            Err(HistoryError::JsonError(_))
        ));
    }

    #[test]
    fn corrupt_file_can_be_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "garbage").unwrap();

        let history = PasswordHistory::load_or_empty(path.clone()).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.path(), Some(path.as_path()));

        history.save().unwrap();
        assert!(PasswordHistory::load(path).unwrap().is_empty());
    }

    #[test]
    fn load_drops_duplicate_passwords() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let file = HistoryFile {
            entries: vec![
                HistoryEntry::new("a", Some(StrengthLevel::Good)),
                HistoryEntry::new("b", None),
                HistoryEntry::new("a", Some(StrengthLevel::Weak)),
                HistoryEntry::new("b", Some(StrengthLevel::Fair)),
            ],
        };
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let history = PasswordHistory::load(path).unwrap();
        let passwords: Vec<&str> = history.entries().iter().map(|e| e.password.as_str()).collect();
        assert_eq!(passwords, vec!["a", "b"]);
        assert_eq!(history.entries()[0].strength, Some(StrengthLevel::Good));
        assert_eq!(history.entries()[1].strength, None);
    }

    #[test]
    fn in_memory_save_is_noop() {
        let mut history = PasswordHistory::in_memory();
        history.record("a", StrengthLevel::Weak);
        assert!(history.save().is_ok());
        assert!(history.path().is_none());
    }
}
