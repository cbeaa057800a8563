use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;

use crate::error::ScanError;
use crate::partition::PartitionRange;

use super::pattern::{assemble_records, field_matches};
use super::Record;

/// Default batch size, 1 GiB: bounds the peak memory of a worker regardless
/// of the total file size.
pub const DEFAULT_BATCH_SIZE: u64 = 1 << 30;

/// Streams one worker's byte range in bounded batches and extracts records.
///
/// The file is opened read-only and read sequentially. Each batch goes
/// through the combined field pattern independently, so a five-field group
/// split across two batches, or across two workers' ranges, is matched by
/// neither side and dropped.
#[derive(Debug, Clone)]
pub struct RangeScanner {
    path: PathBuf,
    range: PartitionRange,
    batch_size: u64,
}

impl RangeScanner {
    pub fn new<P>(path: P, range: PartitionRange) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: path.into(),
            range,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the batch size, in bytes. Must be non-zero.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        assert!(batch_size > 0, "batch size must be non-zero");
        self.batch_size = batch_size;
        self
    }

    pub fn range(&self) -> PartitionRange {
        self.range
    }

    /// Scan the assigned range and return the accumulated records in
    /// discovery order.
    ///
    /// Reads are sequential and there are no side effects besides them. Any
    /// i/o failure aborts the scan: a worker that cannot complete its range
    /// fails the whole job.
    pub fn scan(&self) -> Result<Vec<Record>, ScanError> {
        let mut file = self.open()?;
        file.seek(SeekFrom::Start(self.range.start()))
            .map_err(|e| ScanError::io(&self.path, e))?;

        let mut records = Vec::new();
        let mut chunk = Vec::new();
        let mut position = self.range.start();
        while position < self.range.end() {
            let len = self.batch_size.min(self.range.end() - position);
            chunk.resize(len as usize, 0);
            file.read_exact(&mut chunk)
                .map_err(|e| ScanError::io(&self.path, e))?;
            position += len;

            let matches = field_matches(&chunk);
            records.extend(assemble_records(&matches));
        }
        Ok(records)
    }

    fn open(&self) -> Result<File, ScanError> {
        File::open(&self.path).map_err(|e| ScanError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::partition::compute_range;

    const ENTRY: &[u8] = br#"{"id":"1234567890123456789","key":"k","value":{"text":"hi"},"doc":{"_id":"1234567890123456789","created_at":"2023-03-15T04:12:56.000Z","lang":"en","place":{"bounding_box":{"bbox":[1.0,2.0,3.0,4.0]}}}}"#;

    fn file_with(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn whole_range_single_batch() {
        let file = file_with(ENTRY);
        let range = compute_range(ENTRY.len() as u64, 1, 0);
        let records = RangeScanner::new(file.path(), range).scan().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].lang, "en");
    }

    #[test]
    fn group_split_across_batches_is_dropped() {
        let file = file_with(ENTRY);
        let range = compute_range(ENTRY.len() as u64, 1, 0);
        // a batch far smaller than the entry cuts every group
        let records = RangeScanner::new(file.path(), range)
            .with_batch_size(64)
            .scan()
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn empty_range_reads_nothing() {
        let file = file_with(ENTRY);
        let scanner = RangeScanner::new(file.path(), PartitionRange::new(10, 10));
        assert!(scanner.scan().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let scanner = RangeScanner::new("/nonexistent/dump.json", PartitionRange::new(0, 10));
        assert!(matches!(scanner.scan(), Err(ScanError::Io { .. })));
    }
}
