// src/export/export_json.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::Listing;
use crate::export::ExportError;

pub fn write_json(listings: &[Listing], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Io(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, listings)
        .map_err(|e| ExportError::Io(e.to_string()))?;
    writer.flush().map_err(|e| ExportError::Io(e.to_string()))?;

    Ok(())
}
