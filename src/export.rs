use chrono::Local;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{MenuError, Result};
use crate::labels::MenuLabelRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(OutputFormat::Json),
            Some("csv") => Ok(OutputFormat::Csv),
            _ => Err(MenuError::UnsupportedOutput(path.display().to_string())),
        }
    }
}

/// `out/result.csv` becomes `out/result_<timestamp>.csv` so repeated runs never
/// overwrite each other.
pub fn unique_output_path(path: &Path) -> PathBuf {
    let id = Local::now().format("%Y%m%dT%H%M%S%6f");
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}_{id}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{id}"),
    };
    path.with_file_name(file_name)
}

pub fn export(path: &Path, records: &[MenuLabelRecord]) -> Result<()> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Json => export_json(path, records),
        OutputFormat::Csv => export_csv(path, records),
    }
}

pub fn export_json(path: &Path, records: &[MenuLabelRecord]) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, records)?;
    info!("Results exported to JSON: {}", path.display());
    Ok(())
}

/// Writes one row per record, header included. Nothing is written for an
/// empty batch.
pub fn export_csv(path: &Path, records: &[MenuLabelRecord]) -> Result<()> {
    if records.is_empty() {
        info!("No results to export");
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("Results exported to CSV: {}", path.display());
    Ok(())
}
