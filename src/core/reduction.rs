//! Safety reduction for multi-instance resources
//!
//! This is the classic detection algorithm generalized to resource types with
//! several interchangeable units. Starting from the available vector, any
//! process whose whole outstanding request fits is assumed to run to
//! completion and release everything it holds. Repeating this until nothing
//! changes leaves exactly the processes that can never finish.
//!
//! # Ordering
//!
//! Processes are scanned in ascending id order and, after each completion,
//! the scan restarts from the lowest unfinished id. The finish set at the
//! fixed point does not depend on this order, but the completion order (and
//! with it every downstream artifact) is reproducible only because of it.

use crate::core::types::{ProcessId, Snapshot};

/// Outcome of one reduction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionOutcome {
    /// `finish[p]` is true once process `p` was proven able to complete
    pub finish: Vec<bool>,
    /// Processes in the order they were completed (a safe sequence for the
    /// finished part of the snapshot)
    pub completion_order: Vec<ProcessId>,
    /// Free units per resource after every finished process released its
    /// allocation
    pub available: Vec<i64>,
}

impl ReductionOutcome {
    /// Processes that never finished, ascending
    pub fn deadlocked(&self) -> Vec<ProcessId> {
        self.finish
            .iter()
            .enumerate()
            .filter_map(|(p, &done)| (!done).then_some(p))
            .collect()
    }

    /// Whether at least one process can never finish
    pub fn is_deadlocked(&self) -> bool {
        self.finish.iter().any(|&done| !done)
    }
}

/// Run the reduction to its fixed point
///
/// # Arguments
/// * `snapshot` - A validated snapshot
/// * `available` - Initial free units per resource, as produced by
///   [`crate::core::availability::resolve_available`]
///
/// Runs in O(P² × R): each scan is O(P × R) and every scan but the last
/// finishes one process.
pub fn reduce(snapshot: &Snapshot, available: Vec<i64>) -> ReductionOutcome {
    let mut available = available;
    let mut finish = vec![false; snapshot.process_count];
    let mut completion_order = Vec::with_capacity(snapshot.process_count);

    while let Some(p) = next_runnable(snapshot, &finish, &available) {
        finish[p] = true;
        completion_order.push(p);
        // Sums are bounded by the validated column totals, so this cannot overflow
        for (free, &held) in available.iter_mut().zip(&snapshot.allocation[p]) {
            *free += held;
        }
    }

    ReductionOutcome {
        finish,
        completion_order,
        available,
    }
}

/// Lowest unfinished process whose request fits in `available`
fn next_runnable(snapshot: &Snapshot, finish: &[bool], available: &[i64]) -> Option<ProcessId> {
    (0..snapshot.process_count).find(|&p| {
        !finish[p]
            && snapshot.request[p]
                .iter()
                .zip(available)
                .all(|(&wanted, &free)| wanted <= free)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(allocation: Vec<Vec<i64>>, request: Vec<Vec<i64>>) -> ReductionOutcome {
        let snapshot = Snapshot::new(allocation, request);
        let available = vec![0; snapshot.resource_count];
        reduce(&snapshot, available)
    }

    #[test]
    fn test_empty_snapshot() {
        let outcome = run(vec![], vec![]);
        assert!(!outcome.is_deadlocked());
        assert!(outcome.deadlocked().is_empty());
        assert!(outcome.completion_order.is_empty());
    }

    #[test]
    fn test_two_process_ring() {
        let outcome = run(vec![vec![1, 0], vec![0, 1]], vec![vec![0, 1], vec![1, 0]]);
        assert!(outcome.is_deadlocked());
        assert_eq!(outcome.deadlocked(), vec![0, 1]);
        assert!(outcome.completion_order.is_empty());
    }

    #[test]
    fn test_zero_request_always_finishes() {
        // P1 asks for nothing, so it completes and frees R0 for P0
        let outcome = run(vec![vec![0], vec![2]], vec![vec![2], vec![0]]);
        assert!(!outcome.is_deadlocked());
        assert_eq!(outcome.completion_order, vec![1, 0]);
        assert_eq!(outcome.available, vec![2]);
    }

    #[test]
    fn test_restart_from_lowest_unfinished() {
        // P2 finishes first and frees one unit of R0. The scan then restarts at
        // P0, which now fits, before looking at P1 again.
        let outcome = run(
            vec![vec![0], vec![0], vec![1]],
            vec![vec![1], vec![1], vec![0]],
        );
        assert_eq!(outcome.completion_order, vec![2, 0, 1]);
        assert!(!outcome.is_deadlocked());
    }

    #[test]
    fn test_multi_instance_partial_deadlock() {
        // P0 and P1 each hold one unit and want two more; P2 holds nothing and
        // asks for nothing. Only P2 can finish.
        let outcome = run(
            vec![vec![1], vec![1], vec![0]],
            vec![vec![2], vec![2], vec![0]],
        );
        assert_eq!(outcome.deadlocked(), vec![0, 1]);
        assert_eq!(outcome.completion_order, vec![2]);
    }

    #[test]
    fn test_initial_slack_is_used() {
        let snapshot = Snapshot::new(vec![vec![1], vec![1]], vec![vec![1], vec![1]]);
        let outcome = reduce(&snapshot, vec![1]);
        assert!(!outcome.is_deadlocked());
        assert_eq!(outcome.completion_order, vec![0, 1]);
        assert_eq!(outcome.available, vec![3]);
    }
}
