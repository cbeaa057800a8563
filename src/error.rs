use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::WorkerId;

/// Errors that abort a scan job.
///
/// Per-candidate assembly failures are deliberately absent: a candidate that
/// does not fully assemble is dropped during the scan and never surfaces as
/// an error.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Opening, seeking, reading or writing a file failed.
    ///
    /// Fatal for the whole job: the merge needs the accumulator of every
    /// worker.
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A worker thread panicked before delivering its accumulator.
    #[error("worker {0} panicked during the scan")]
    WorkerPanicked(WorkerId),
    /// The gather completed without an accumulator from this worker.
    #[error("worker {0} did not deliver its accumulator")]
    MissingAccumulator(WorkerId),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}
