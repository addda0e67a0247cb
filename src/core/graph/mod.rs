//! Graph module for deadlock explanation
//!
//! This module contains the graph used to turn a deadlocked set into a
//! concrete witness:
//! - Wait-for graph: bipartite holds/waits edges between processes and resources
//! - Cycle extraction: deterministic DFS for one cycle through deadlocked processes

pub(crate) mod cycle;
pub(crate) mod wait_for_graph;

pub use cycle::{extract_cycle, verify_cycle};
pub use wait_for_graph::WaitForGraph;
