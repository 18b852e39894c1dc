// src/export/mod.rs

mod export_csv;
mod export_json;

pub use export_csv::write_csv;
pub use export_json::write_json;

use std::error::Error;
use std::fmt;
use std::path::Path;

use crate::domain::Listing;

/// Output format, selected by the output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(ExportFormat::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

/// Write the listings to `path` in the format its extension selects.
/// An existing file is overwritten; zero listings still produce a valid
/// file (header-only CSV, empty JSON array).
pub fn export_listings(listings: &[Listing], path: &Path) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Csv => write_csv(listings, path)?,
        ExportFormat::Json => write_json(listings, path)?,
    }
    Ok(format)
}

#[derive(Debug)]
pub enum ExportError {
    Io(String),
    UnsupportedFormat(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(msg) => write!(f, "Write failed: {msg}"),
            ExportError::UnsupportedFormat(path) => {
                write!(f, "Unsupported output extension for '{path}': use .csv or .json")
            }
        }
    }
}

impl Error for ExportError {}
