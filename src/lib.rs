#[macro_use]
extern crate log;

pub mod channel;
pub mod config;
pub mod error;
pub mod merge;
pub mod partition;
pub mod scan;
pub mod sink;
pub mod worker;

pub use config::{Dataset, OutputMode, ScanConfig};
pub use error::ScanError;
pub use partition::{compute_range, PartitionRange};
pub use scan::{RangeScanner, Record, DEFAULT_BATCH_SIZE};
pub use worker::run_scan_job;

/// Rank of a worker, unique within a job.
pub type WorkerId = u32;
