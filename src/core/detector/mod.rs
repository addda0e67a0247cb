pub mod batch;

use crate::core::availability::resolve_available;
use crate::core::error::DetectionError;
use crate::core::graph::{WaitForGraph, extract_cycle};
use crate::core::logger::GraphState;
use crate::core::reduction::{ReductionOutcome, reduce};
use crate::core::report::DetectionReport;
use crate::core::types::{DetectionResult, Snapshot};
use crate::core::validator::validate;
use std::thread;

/// Engine-level knobs for one detection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectOptions {
    /// Build the wait-for graph on a scoped thread while the reduction runs
    ///
    /// Both steps are pure functions of the snapshot, so the result is the
    /// same either way. Worth it only for large snapshots.
    pub concurrent_graph: bool,
}

/// Everything one detection run computed
///
/// The [`DetectionResult`] is the response contract; the reduction outcome
/// and the graph are kept for reporting and visualization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub result: DetectionResult,
    pub reduction: ReductionOutcome,
    pub graph: WaitForGraph,
}

impl Analysis {
    /// Build a timestamped report for callbacks and logs
    pub fn report(&self) -> DetectionReport {
        DetectionReport::new(
            self.result.clone(),
            GraphState::from_graph(&self.graph, &self.result.cycle_path),
            self.reduction.completion_order.clone(),
        )
    }
}

/// Detect deadlock in a snapshot
///
/// Validates the snapshot, derives the available vector, runs the safety
/// reduction, and extracts a witness cycle through the deadlocked processes.
///
/// # Errors
/// Fails only on malformed input (see [`DetectionError`]); every check runs
/// before the reduction, so no partial result is ever produced.
///
/// # Example
///
/// ```
/// use deadlock_witness::{Snapshot, detect};
///
/// // P0 holds R0 and wants R1, P1 holds R1 and wants R0
/// let snapshot = Snapshot::new(vec![vec![1, 0], vec![0, 1]], vec![vec![0, 1], vec![1, 0]]);
/// let result = detect(&snapshot).unwrap();
///
/// assert!(result.is_deadlocked);
/// assert_eq!(result.deadlocked_processes, vec![0, 1]);
/// let path: Vec<String> = result.cycle_path.iter().map(|n| n.to_string()).collect();
/// assert_eq!(path, ["P0", "R1", "P1", "R0", "P0"]);
/// ```
pub fn detect(snapshot: &Snapshot) -> Result<DetectionResult, DetectionError> {
    detect_with(snapshot, &DetectOptions::default())
}

/// Detect deadlock with explicit options
pub fn detect_with(
    snapshot: &Snapshot,
    options: &DetectOptions,
) -> Result<DetectionResult, DetectionError> {
    analyze(snapshot, options).map(|analysis| analysis.result)
}

/// Run a detection and keep the intermediate artifacts
///
/// # Errors
/// Same as [`detect`].
pub fn analyze(snapshot: &Snapshot, options: &DetectOptions) -> Result<Analysis, DetectionError> {
    validate(snapshot)?;
    let available = resolve_available(snapshot)?;

    let (reduction, graph) = if options.concurrent_graph {
        thread::scope(|scope| {
            let builder = scope.spawn(|| WaitForGraph::build(snapshot));
            let reduction = reduce(snapshot, available);
            let graph = builder
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            (reduction, graph)
        })
    } else {
        (reduce(snapshot, available), WaitForGraph::build(snapshot))
    };

    let deadlocked_processes = reduction.deadlocked();
    let cycle_path = if deadlocked_processes.is_empty() {
        Vec::new()
    } else {
        extract_cycle(&graph, &deadlocked_processes)
    };

    Ok(Analysis {
        result: DetectionResult {
            is_deadlocked: !deadlocked_processes.is_empty(),
            deadlocked_processes,
            cycle_path,
        },
        reduction,
        graph,
    })
}
