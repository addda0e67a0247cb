//! Witness cycle extraction
//!
//! The reduction decides *whether* processes are deadlocked; this module shows
//! *why* by finding one circular wait through the wait-for graph. The search is
//! restricted to deadlocked processes: a process that can finish will
//! eventually release what it holds, so it cannot be part of the explanation.
//!
//! A deadlocked set does not always contain a simple cycle. With several units
//! per resource a process can be stuck behind the combined demand of others
//! without any single loop of holds and waits. In that case the extractor
//! returns an empty path and the deadlock verdict stands on its own.

use crate::core::graph::WaitForGraph;
use crate::core::types::{DetectionResult, NodeId, ProcessId};
use fxhash::FxHashSet;

/// DFS colouring of arena nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnStack,
    Done,
}

/// One level of the explicit DFS stack
struct Frame {
    node: usize,
    /// Position of the next successor to try
    cursor: usize,
}

/// Find one cycle through the deadlocked part of the graph
///
/// Depth-first search starts from each deadlocked process in ascending id
/// order and tries successors in ascending id order. The first edge that
/// reaches a node already on the current path closes the cycle; the returned
/// path runs from that node's position on the path to the current node and
/// repeats the first node at the end, e.g. `[P0, R1, P1, R0, P0]`.
///
/// Process nodes outside `deadlocked` are never entered. Nodes fully explored
/// from an earlier root are skipped, since nothing reachable from them closes
/// a cycle.
///
/// # Returns
/// The cycle, or an empty vector if no cycle runs through deadlocked processes.
pub fn extract_cycle(graph: &WaitForGraph, deadlocked: &[ProcessId]) -> Vec<NodeId> {
    let members: FxHashSet<ProcessId> = deadlocked
        .iter()
        .copied()
        .filter(|&p| p < graph.process_count())
        .collect();
    let mut roots: Vec<ProcessId> = members.iter().copied().collect();
    roots.sort_unstable();

    let enterable = |index: usize| match graph.node(index) {
        NodeId::Process(p) => members.contains(&p),
        NodeId::Resource(_) => true,
    };

    let mut state = vec![Visit::Unvisited; graph.node_count()];
    let mut stack: Vec<Frame> = Vec::new();

    for root in roots {
        let root = graph.process_index(root);
        if state[root] != Visit::Unvisited {
            continue;
        }

        state[root] = Visit::OnStack;
        stack.push(Frame {
            node: root,
            cursor: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let Some(&next) = graph.successors(node).get(frame.cursor) else {
                state[node] = Visit::Done;
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            if !enterable(next) {
                continue;
            }

            match state[next] {
                Visit::OnStack => return close_cycle(graph, &stack, next),
                Visit::Done => {}
                Visit::Unvisited => {
                    state[next] = Visit::OnStack;
                    stack.push(Frame {
                        node: next,
                        cursor: 0,
                    });
                }
            }
        }
    }

    Vec::new()
}

/// Cut the cycle out of the current DFS path
fn close_cycle(graph: &WaitForGraph, stack: &[Frame], repeated: usize) -> Vec<NodeId> {
    // `repeated` is on the stack, so the position always exists
    let start = stack
        .iter()
        .position(|frame| frame.node == repeated)
        .unwrap_or(0);

    stack[start..]
        .iter()
        .map(|frame| graph.node(frame.node))
        .chain(std::iter::once(graph.node(repeated)))
        .collect()
}

/// Check that a result's witness cycle is consistent with the graph
///
/// Holds for every result the detector produces; exposed so that consumers
/// who receive a result over the wire can check it against their own graph.
///
/// An empty cycle is accepted. A non-empty one must have at least two
/// entries, start and end on the same node, follow real edges between
/// consecutive nodes, and only visit processes listed as deadlocked.
pub fn verify_cycle(graph: &WaitForGraph, result: &DetectionResult) -> bool {
    let path = &result.cycle_path;
    if path.is_empty() {
        return true;
    }
    if path.len() < 2 || path.first() != path.last() {
        return false;
    }

    let edges_exist = path.windows(2).all(|pair| graph.has_edge(pair[0], pair[1]));
    let processes_deadlocked = path.iter().all(|node| match node {
        NodeId::Process(p) => result.deadlocked_processes.binary_search(p).is_ok(),
        NodeId::Resource(_) => true,
    });

    edges_exist && processes_deadlocked
}
