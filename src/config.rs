//! Command line configuration of a scan job.

use std::path::PathBuf;
use std::thread;

use clap::{Parser, ValueEnum};

use crate::scan::DEFAULT_BATCH_SIZE;

/// The fixed set of datasets a job can be launched on.
///
/// An invalid selection is rejected by the parser, with a non-zero exit
/// status, before any file i/o is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dataset {
    /// The full dump, around 100 GB.
    #[value(name = "twitter-100gb")]
    Twitter100Gb,
    /// A medium sample.
    #[value(name = "twitter-50mb")]
    Twitter50Mb,
    /// A tiny sample for smoke runs.
    #[value(name = "twitter-1mb")]
    Twitter1Mb,
}

impl Dataset {
    /// Stem of the dataset, used both for the input file name and for the
    /// results sub-directory.
    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Twitter100Gb => "twitter-100gb",
            Dataset::Twitter50Mb => "twitter-50mb",
            Dataset::Twitter1Mb => "twitter-1mb",
        }
    }
}

/// What the job writes out after the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Every extracted record, one JSON object per line.
    Records,
    /// Only the most frequent language with its aggregated count.
    TopLang,
}

/// A scan job: which dataset, how many workers, what to write out.
#[derive(Debug, Parser)]
#[command(
    name = "tweetscan",
    about = "Scan a huge social-media dump in parallel and extract geo-tagged records"
)]
pub struct ScanConfig {
    /// Dataset to scan.
    #[arg(value_enum)]
    pub dataset: Dataset,

    /// Number of scanning workers, fixed for the whole job.
    #[arg(long, default_value_t = default_workers())]
    pub workers: u32,

    /// Bytes read per batch by each worker.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u64,

    /// Output mode.
    #[arg(long, value_enum, default_value = "records")]
    pub mode: OutputMode,

    /// Directory holding the dataset files.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory the results are written under.
    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,
}

impl ScanConfig {
    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.dataset.name()))
    }

    pub fn output_path(&self) -> PathBuf {
        let file = match self.mode {
            OutputMode::Records => "tweets.jsonl",
            OutputMode::TopLang => "top_language.jsonl",
        };
        self.results_dir.join(self.dataset.name()).join(file)
    }
}

fn default_workers() -> u32 {
    thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}
