use deadlock_witness::{DetectOptions, Snapshot, analyze, detect};
mod common;
use common::assert_valid_witness;

fn classic() -> Snapshot {
    Snapshot::new(
        vec![
            vec![0, 1, 0],
            vec![2, 0, 0],
            vec![3, 0, 2],
            vec![2, 1, 1],
            vec![0, 0, 2],
        ],
        vec![
            vec![0, 0, 0],
            vec![2, 0, 2],
            vec![0, 0, 0],
            vec![1, 0, 0],
            vec![0, 0, 2],
        ],
    )
}

#[test]
fn test_classic_snapshot_is_safe() {
    let snapshot = classic();
    let result = detect(&snapshot).unwrap();

    assert!(!result.is_deadlocked);
    assert!(result.deadlocked_processes.is_empty());
    assert!(result.cycle_path.is_empty());
    assert_valid_witness(&snapshot, &result);
}

#[test]
fn test_classic_completion_order() {
    // P0 and P2 ask for nothing. P0 finishes first and frees R1; the rescan
    // finds P2, whose release covers P1; P3 and P4 follow.
    let analysis = analyze(&classic(), &DetectOptions::default()).unwrap();
    assert_eq!(analysis.reduction.completion_order, vec![0, 2, 1, 3, 4]);
    assert_eq!(analysis.reduction.available, vec![7, 2, 5]);
}

#[test]
fn test_classic_with_extra_demand_deadlocks() {
    // P2 now also wants one more R2 before it can finish. With nothing spare,
    // only P0 can complete and the rest stay blocked.
    let mut snapshot = classic();
    snapshot.request[2][2] = 1;

    let analysis = analyze(&snapshot, &DetectOptions::default()).unwrap();
    assert_eq!(analysis.reduction.completion_order, vec![0]);
    assert_eq!(analysis.result.deadlocked_processes, vec![1, 2, 3, 4]);
    assert_valid_witness(&snapshot, &analysis.result);
    // P1 holds R0 and asks for more of it: the first cycle reached from P1
    assert_eq!(
        analysis
            .result
            .cycle_path
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>(),
        ["P1", "R0", "P1"]
    );
}
