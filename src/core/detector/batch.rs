//! Parallel detection over many independent snapshots
//!
//! Detection runs share nothing, so a batch is split across a fixed pool of
//! scoped worker threads. Workers pull snapshot indices from a channel and
//! push `(index, result)` pairs back; results are reassembled in input order.

use crate::core::detector::{DetectOptions, detect_with};
use crate::core::error::DetectionError;
use crate::core::types::{DetectionResult, Snapshot};
use crossbeam_channel::unbounded;
use std::thread;

/// Apply `job` to every snapshot on `workers` threads
///
/// The output has one entry per snapshot, in input order. A `workers` value
/// of zero is treated as one, and no more threads than snapshots are spawned.
pub fn run_parallel<F, R>(snapshots: &[Snapshot], workers: usize, job: F) -> Vec<R>
where
    F: Fn(&Snapshot) -> R + Sync,
    R: Send,
{
    let workers = workers.clamp(1, snapshots.len().max(1));
    let (job_tx, job_rx) = unbounded::<usize>();
    let (result_tx, result_rx) = unbounded::<(usize, R)>();

    for index in 0..snapshots.len() {
        // The receiver is still alive here, so an unbounded send cannot fail
        let _ = job_tx.send(index);
    }
    drop(job_tx);

    thread::scope(|scope| {
        for _ in 0..workers {
            let jobs = job_rx.clone();
            let results = result_tx.clone();
            let job = &job;
            scope.spawn(move || {
                for index in jobs {
                    let _ = results.send((index, job(&snapshots[index])));
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None)
        .take(snapshots.len())
        .collect();
    for (index, result) in result_rx {
        slots[index] = Some(result);
    }
    slots.into_iter().flatten().collect()
}

/// Detect deadlock in every snapshot of a batch
///
/// Each entry of the output corresponds to the snapshot at the same position
/// and equals what [`detect_with`] returns for it on its own.
pub fn detect_batch(
    snapshots: &[Snapshot],
    workers: usize,
    options: &DetectOptions,
) -> Vec<Result<DetectionResult, DetectionError>> {
    run_parallel(snapshots, workers, |snapshot| detect_with(snapshot, options))
}
