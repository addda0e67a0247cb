//! Snapshot generators shared by the benchmarks

use deadlock_witness::Snapshot;

/// Process `i` holds resource `i` and requests resource `i + 1 (mod n)`
pub fn ring(n: usize) -> Snapshot {
    let mut allocation = vec![vec![0; n]; n];
    let mut request = vec![vec![0; n]; n];
    for i in 0..n {
        allocation[i][i] = 1;
        request[i][(i + 1) % n] = 1;
    }
    Snapshot::new(allocation, request)
}

/// Worst case for the reduction: process `i` can only run after every process
/// above it has released, so each scan walks almost the whole table
pub fn reverse_chain(n: usize) -> Snapshot {
    let mut allocation = vec![vec![0; n]; n];
    let mut request = vec![vec![0; n]; n];
    for i in 0..n {
        allocation[i][i] = 1;
        if i + 1 < n {
            request[i][i + 1] = 1;
        }
    }
    Snapshot::new(allocation, request)
}
