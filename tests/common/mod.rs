use deadlock_witness::{DetectionResult, NodeId, Snapshot, WaitForGraph, verify_cycle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[allow(dead_code)]
pub const RANDOM_ROUNDS: u64 = 300;

/// Parse a list of `P<n>` / `R<n>` identifiers
#[allow(dead_code)]
pub fn nodes(ids: &[&str]) -> Vec<NodeId> {
    ids.iter()
        .map(|id| id.parse().expect("valid node id"))
        .collect()
}

/// Process `i` holds resource `i` and requests resource `i + 1 (mod n)`
#[allow(dead_code)]
pub fn ring(n: usize) -> Snapshot {
    let mut allocation = vec![vec![0; n]; n];
    let mut request = vec![vec![0; n]; n];
    for i in 0..n {
        allocation[i][i] = 1;
        request[i][(i + 1) % n] = 1;
    }
    Snapshot::new(allocation, request)
}

/// Seeded snapshot with sparse small entries
///
/// Around `density` of the entries are non-zero. With `with_totals`, each
/// resource gets up to two units of slack above what is allocated.
#[allow(dead_code)]
pub fn random_snapshot(seed: u64, density: f64, with_totals: bool) -> Snapshot {
    let mut rng = StdRng::seed_from_u64(seed);
    let processes: usize = rng.random_range(1..=8);
    let resources: usize = rng.random_range(1..=5);

    let entry = |rng: &mut StdRng| -> i64 {
        if rng.random_bool(density) {
            rng.random_range(1..=3)
        } else {
            0
        }
    };

    let allocation: Vec<Vec<i64>> = (0..processes)
        .map(|_| (0..resources).map(|_| entry(&mut rng)).collect())
        .collect();
    let request: Vec<Vec<i64>> = (0..processes)
        .map(|_| (0..resources).map(|_| entry(&mut rng)).collect())
        .collect();

    let snapshot = Snapshot::new(allocation, request);
    if with_totals {
        let totals = (0..resources)
            .map(|r| {
                let allocated: i64 = snapshot.allocation.iter().map(|row| row[r]).sum();
                allocated + rng.random_range(0..=2)
            })
            .collect();
        snapshot.with_totals(totals)
    } else {
        snapshot
    }
}

/// Check the witness cycle of a result against the snapshot it came from
#[allow(dead_code)]
pub fn assert_valid_witness(snapshot: &Snapshot, result: &DetectionResult) {
    let graph = WaitForGraph::build(snapshot);
    assert!(
        verify_cycle(&graph, result),
        "witness {:?} inconsistent with graph",
        result.cycle_path
    );

    if !result.cycle_path.is_empty() {
        assert!(result.is_deadlocked, "cycle reported without deadlock");
        // Bipartite edges: kinds must alternate along the path
        for pair in result.cycle_path.windows(2) {
            assert_ne!(pair[0].is_process(), pair[1].is_process());
        }
    }

    assert_eq!(result.is_deadlocked, !result.deadlocked_processes.is_empty());
    assert!(
        result.deadlocked_processes.windows(2).all(|w| w[0] < w[1]),
        "deadlocked processes must be strictly ascending"
    );
}
