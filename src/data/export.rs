use std::io;
use std::path::Path;

use thiserror::Error;

use super::model::{Record, RowSet};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("writing export file: {0}")]
    Io(#[from] io::Error),
}

/// Serialise rows as UTF-8 CSV with the canonical header row. The header is
/// written even when `rows` is empty.
pub fn serialize_csv(rows: &RowSet<'_>) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(Record::COLUMN_NAMES)?;
    for record in rows.iter() {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Serialise rows and write them to `path`, replacing any existing file.
pub fn write_csv(path: &Path, rows: &RowSet<'_>) -> Result<(), ExportError> {
    let bytes = serialize_csv(rows)?;
    std::fs::write(path, bytes)?;
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}
