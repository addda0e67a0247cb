//! Wait-For Graph over processes and resources
//!
//! This module implements the bipartite directed graph used to explain a
//! deadlock. Nodes are processes and resource types; edges encode who holds
//! and who waits:
//!
//! - `Resource(r) -> Process(p)` when `p` holds at least one unit of `r`
//! - `Process(p) -> Resource(r)` when `p` still requests at least one unit of `r`
//!
//! Unit counts are dropped; an edge only records that the relationship exists.
//!
//! # Representation
//!
//! Nodes live in an index arena: process `p` is node `p`, resource `r` is node
//! `P + r`. Each node owns a successor list of arena indices, built in
//! ascending id order, so walks over the graph are deterministic and cycles
//! in the graph never turn into ownership cycles in memory.

use crate::core::types::{NodeId, ProcessId, ResourceId, Snapshot};

/// Represents the holds/waits relationships of one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitForGraph {
    /// Number of process nodes; they occupy indices `0..process_count`
    process_count: usize,
    /// Number of resource nodes; they occupy indices after the processes
    resource_count: usize,
    /// Outgoing edges of every node, ascending by index
    successors: Vec<Vec<usize>>,
}

impl WaitForGraph {
    /// Build the graph for a validated snapshot
    ///
    /// Pure function of the snapshot; it does not need the reduction outcome
    /// and can be computed alongside it.
    pub fn build(snapshot: &Snapshot) -> Self {
        let (processes, resources) = (snapshot.process_count, snapshot.resource_count);
        let mut successors = vec![Vec::new(); processes + resources];

        // Rows in ascending order keep every resource's successor list sorted
        for p in 0..processes {
            for r in 0..resources {
                if snapshot.allocation[p][r] > 0 {
                    successors[processes + r].push(p);
                }
                if snapshot.request[p][r] > 0 {
                    successors[p].push(processes + r);
                }
            }
        }

        WaitForGraph {
            process_count: processes,
            resource_count: resources,
            successors,
        }
    }

    /// Number of process nodes
    pub fn process_count(&self) -> usize {
        self.process_count
    }

    /// Number of resource nodes
    pub fn resource_count(&self) -> usize {
        self.resource_count
    }

    /// Total number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    /// Arena index of a process node
    pub fn process_index(&self, process: ProcessId) -> usize {
        process
    }

    /// Arena index of a resource node
    pub fn resource_index(&self, resource: ResourceId) -> usize {
        self.process_count + resource
    }

    /// Arena index of a node, or `None` if it is outside the graph
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        match node {
            NodeId::Process(p) if p < self.process_count => Some(self.process_index(p)),
            NodeId::Resource(r) if r < self.resource_count => Some(self.resource_index(r)),
            _ => None,
        }
    }

    /// Node identifier for an arena index
    ///
    /// # Panics
    /// Panics if `index` is not below [`Self::node_count`].
    pub fn node(&self, index: usize) -> NodeId {
        assert!(index < self.node_count(), "node index {index} out of range");
        if index < self.process_count {
            NodeId::Process(index)
        } else {
            NodeId::Resource(index - self.process_count)
        }
    }

    /// Outgoing neighbours of a node, ascending by index
    pub fn successors(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }

    /// Whether the directed edge `from -> to` exists
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self.successors[from].binary_search(&to).is_ok(),
            _ => false,
        }
    }

    /// Iterate over every edge as `(from, to)`, sources in index order
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.successors.iter().enumerate().flat_map(move |(from, targets)| {
            targets
                .iter()
                .map(move |&to| (self.node(from), self.node(to)))
        })
    }
}
