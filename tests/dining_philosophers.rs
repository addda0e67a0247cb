use deadlock_witness::{DetectOptions, analyze, detect};
mod common;
use common::{assert_valid_witness, nodes, ring};

#[test]
fn test_dining_philosophers_deadlock() {
    // Every philosopher holds the left fork and waits for the right one
    let table = ring(5);
    let result = detect(&table).unwrap();

    assert!(result.is_deadlocked);
    assert_eq!(result.deadlocked_processes, vec![0, 1, 2, 3, 4]);
    assert_eq!(
        result.cycle_path,
        nodes(&["P0", "R1", "P1", "R2", "P2", "R3", "P3", "R4", "P4", "R0", "P0"])
    );
    assert_valid_witness(&table, &result);
}

#[test]
fn test_left_handed_philosopher_breaks_the_ring() {
    // P4 reaches for R0 first and has not picked up R4 yet, so R4 lies free
    let mut table = ring(5);
    table.allocation[4][4] = 0;
    table.request[4] = vec![1, 0, 0, 0, 0];
    let table = table.with_totals(vec![1; 5]);

    let analysis = analyze(&table, &DetectOptions::default()).unwrap();
    assert!(!analysis.result.is_deadlocked);
    assert_eq!(analysis.reduction.completion_order, vec![3, 2, 1, 0, 4]);
}

#[test]
fn test_free_fork_without_declared_totals_does_not_exist() {
    // Same table, but without totals nothing beyond what is held exists:
    // R4 has no units at all, so P3 can never eat
    let mut table = ring(5);
    table.allocation[4][4] = 0;
    table.request[4] = vec![1, 0, 0, 0, 0];

    let result = detect(&table).unwrap();
    assert!(result.is_deadlocked);
    assert_eq!(result.deadlocked_processes, vec![0, 1, 2, 3, 4]);
    // The chain ends at R4, which nobody holds, so there is no circular wait
    assert!(result.cycle_path.is_empty());
}
