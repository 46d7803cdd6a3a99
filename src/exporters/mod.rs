// src/exporters/mod.rs
pub mod csv;

pub use csv::{CsvExportError, CsvExporter};
