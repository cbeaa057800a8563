//! JSON Lines output of the consolidated result.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::ScanError;
use crate::scan::Record;

/// Serialize the consolidated records, one JSON object per line, in the
/// order supplied.
///
/// The destination is written once, after the merge has completed. Any i/o
/// failure is returned as-is: there are no retries.
pub fn write_records(records: &[Record], path: &Path) -> Result<(), ScanError> {
    write_lines(records, path)
}

/// Serialize the aggregated key/value pair of the frequency variant as a
/// single JSON Lines entry, e.g. `{"en":4521}`.
pub fn write_top_language(lang: &str, count: u64, path: &Path) -> Result<(), ScanError> {
    let mut pair = serde_json::Map::new();
    pair.insert(lang.to_owned(), count.into());
    write_lines(&[serde_json::Value::Object(pair)], path)
}

fn write_lines<T: Serialize>(items: &[T], path: &Path) -> Result<(), ScanError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScanError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| ScanError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for item in items {
        serde_json::to_writer(&mut writer, item)
            .map_err(|e| ScanError::io(path, e.into()))?;
        writer.write_all(b"\n").map_err(|e| ScanError::io(path, e))?;
    }
    writer.flush().map_err(|e| ScanError::io(path, e))?;
    Ok(())
}
