//! Worker threads and the coordinator-side gather.
//!
//! One thread per rank scans its own byte range with its own read-only file
//! handle; every accumulator reaches the coordinator through a channel and
//! ownership moves with the message, so no state is shared between workers.

use std::path::Path;
use std::thread::JoinHandle;

use crate::channel::{self, UnboundedReceiver, UnboundedSender};
use crate::error::ScanError;
use crate::partition::compute_range;
use crate::scan::{RangeScanner, Record};
use crate::WorkerId;

/// Call a function if this struct goes out of scope without calling `defuse`,
/// including during a panic stack-unwinding.
struct CatchPanic<F: FnOnce()> {
    /// True if the function should be called.
    primed: bool,
    /// Function to call.
    ///
    /// The `Drop` implementation will move out the function.
    handler: Option<F>,
}

impl<F: FnOnce()> CatchPanic<F> {
    fn new(handler: F) -> Self {
        Self {
            primed: true,
            handler: Some(handler),
        }
    }

    /// Avoid calling the function on drop.
    fn defuse(&mut self) {
        self.primed = false;
    }
}

impl<F: FnOnce()> Drop for CatchPanic<F> {
    fn drop(&mut self) {
        if self.primed {
            (self.handler.take().unwrap())();
        }
    }
}

type GatherMessage = (WorkerId, Result<Vec<Record>, ScanError>);

/// Launch one scanning worker per rank and gather every accumulator at the
/// coordinator.
///
/// Blocks until all workers completed, then returns the accumulators in rank
/// order. The worker count is fixed for the whole job: there is no
/// work-stealing and no cancellation, and if the ranges are unbalanced the
/// coordinator simply waits for the slowest worker. Any worker failure fails
/// the job as a whole, since the merge needs every accumulator.
pub fn run_scan_job(
    path: &Path,
    workers: u32,
    batch_size: u64,
) -> Result<Vec<Vec<Record>>, ScanError> {
    assert!(workers >= 1, "a job needs at least one worker");

    let file_size = std::fs::metadata(path)
        .map_err(|e| ScanError::io(path, e))?
        .len();
    info!("scanning {} bytes with {} workers", file_size, workers);

    let (sender, receiver) = channel::unbounded();
    let mut handles = Vec::with_capacity(workers as usize);
    for rank in 0..workers {
        let range = compute_range(file_size, workers, rank);
        info!(
            "worker {} assigned range [{}, {})",
            rank,
            range.start(),
            range.end()
        );
        let scanner = RangeScanner::new(path, range).with_batch_size(batch_size);
        handles.push(spawn_worker(rank, scanner, sender.clone()));
    }
    // the gather ends when every worker has hung up its sender
    drop(sender);

    let gathered = gather(receiver, workers);

    for (rank, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            return Err(ScanError::WorkerPanicked(rank as WorkerId));
        }
    }
    info!("gather completed");

    let mut accumulators = Vec::with_capacity(workers as usize);
    for (rank, slot) in gathered.into_iter().enumerate() {
        match slot {
            Some(Ok(records)) => accumulators.push(records),
            Some(Err(e)) => return Err(e),
            None => return Err(ScanError::MissingAccumulator(rank as WorkerId)),
        }
    }
    Ok(accumulators)
}

fn spawn_worker(
    rank: WorkerId,
    scanner: RangeScanner,
    sender: UnboundedSender<GatherMessage>,
) -> JoinHandle<()> {
    std::thread::Builder::new()
        .name(format!("scan-worker-{}", rank))
        .spawn(move || {
            let mut catch_panic = CatchPanic::new(move || {
                error!("worker {} crashed!", rank);
            });
            let result = scanner.scan();
            match &result {
                Ok(records) => info!("worker {} completed, {} records", rank, records.len()),
                Err(e) => error!("worker {} failed: {}", rank, e),
            }
            // a failed send means the coordinator is gone already
            let _ = sender.send((rank, result));
            catch_panic.defuse();
        })
        .unwrap()
}

/// Block until every worker has either delivered its accumulator or hung up.
fn gather(
    receiver: UnboundedReceiver<GatherMessage>,
    workers: u32,
) -> Vec<Option<Result<Vec<Record>, ScanError>>> {
    let mut slots: Vec<_> = (0..workers).map(|_| None).collect();
    while let Ok((rank, result)) = receiver.recv() {
        debug!("gathered accumulator of worker {}", rank);
        slots[rank as usize] = Some(result);
    }
    slots
}
