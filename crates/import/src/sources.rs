use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tally_core::SourceRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Source batch must be a JSON array of transactions")]
    NotAnArray,
}

/// Reads a JSON array of source records.
///
/// A non-numeric `amount` or a missing `id` or `timestamp` on one record is
/// not an error; the field arrives empty and only lowers that record's score.
pub fn import_sources<R: Read>(data: R) -> Result<Vec<SourceRecord>, SourceError> {
    let value: serde_json::Value = serde_json::from_reader(data)?;
    if !value.is_array() {
        return Err(SourceError::NotAnArray);
    }
    let records: Vec<SourceRecord> = serde_json::from_value(value)?;
    tracing::debug!(records = records.len(), "source batch imported");
    Ok(records)
}

pub fn load_sources(path: &Path) -> Result<Vec<SourceRecord>, SourceError> {
    let file = File::open(path)?;
    import_sources(BufReader::new(file))
}
