#[macro_use]
extern crate log;

use std::process::ExitCode;

use clap::Parser;

use tweetscan::config::{OutputMode, ScanConfig};
use tweetscan::error::ScanError;
use tweetscan::{merge, sink, worker};

fn main() -> ExitCode {
    env_logger::init();

    let config = ScanConfig::parse();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("job failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ScanConfig) -> Result<(), ScanError> {
    let input = config.input_path();
    let output = config.output_path();
    info!("scanning {:?} with {} workers", input, config.workers);

    let accumulators = worker::run_scan_job(&input, config.workers, config.batch_size)?;

    match config.mode {
        OutputMode::Records => {
            let records = merge::merge(accumulators);
            info!("merged {} records", records.len());
            sink::write_records(&records, &output)?;
        }
        OutputMode::TopLang => {
            let counts =
                merge::merge_counts(accumulators.iter().map(|acc| merge::count_languages(acc)));
            match merge::max_count(&counts) {
                Some((lang, count)) => {
                    info!("top language is {:?} with {} records", lang, count);
                    sink::write_top_language(lang, count, &output)?;
                }
                // an empty dump still produces an (empty) output file
                None => sink::write_records(&[], &output)?,
            }
        }
    }
    info!("results written to {:?}", output);
    Ok(())
}
