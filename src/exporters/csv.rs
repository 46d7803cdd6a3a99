// src/exporters/csv.rs
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::HistoryEntry;
use crate::utils::format_local_timestamp;

pub const CSV_HEADER: [&str; 3] = ["Password", "Generated At", "Strength"];
const DELIMITER: &str = ",";
const MISSING_STRENGTH: &str = "N/A";

#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Nothing to export")]
    Empty,
}

pub struct CsvExporter;

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render `entries` as CSV text: a fixed header, then one row per entry
    /// in the given order. Rows are joined by `\n` without a trailing newline.
    pub fn render(&self, entries: &[HistoryEntry]) -> String {
        let mut rows = Vec::with_capacity(entries.len() + 1);
        rows.push(CSV_HEADER.join(DELIMITER));

        for entry in entries {
            let strength = entry
                .strength
                .map(|level| level.to_string())
                .unwrap_or_else(|| MISSING_STRENGTH.to_string());

            rows.push(format!(
                "{}{}{}{}{}",
                quote(&entry.password),
                DELIMITER,
                format_local_timestamp(entry.timestamp),
                DELIMITER,
                strength
            ));
        }

        rows.join("\n")
    }

    // Export entries to a CSV file, returning the number of rows written
    pub fn export(&self, path: &Path, entries: &[HistoryEntry]) -> Result<usize, CsvExportError> {
        if entries.is_empty() {
            return Err(CsvExportError::Empty);
        }

        fs::write(path, self.render(entries))?;
        log::info!("Exported {} entries to {}", entries.len(), path.display());

        Ok(entries.len())
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
