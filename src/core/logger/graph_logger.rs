use crate::core::graph::WaitForGraph;
use crate::core::types::{NodeId, ProcessId, ResourceId};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Kind of relationship a link stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Resource -> process: the process holds units of the resource
    Alloc,
    /// Process -> resource: the process waits for units of the resource
    Request,
}

/// Represents a link between a process and a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: NodeId,
    pub target: NodeId,
    /// Type of relationship (alloc or request)
    #[serde(rename = "type")]
    pub link_type: LinkType,
    /// Whether this link is part of the witness cycle
    #[serde(default)]
    pub in_cycle: bool,
}

/// Represents the complete process/resource graph of one detection run
///
/// This structure is what an external renderer draws: every process, every
/// resource type and every holds/waits link, with the witness cycle's links
/// flagged so they can be highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphState {
    /// All process IDs in the snapshot
    pub processes: Vec<ProcessId>,
    /// All resource IDs in the snapshot
    pub resources: Vec<ResourceId>,
    /// Links in the order the wait-for graph stores them
    pub links: Vec<GraphLink>,
}

impl GraphState {
    /// Flatten a wait-for graph, marking the links of `cycle`
    pub fn from_graph(graph: &WaitForGraph, cycle: &[NodeId]) -> Self {
        let cycle_links: FxHashSet<(NodeId, NodeId)> =
            cycle.windows(2).map(|pair| (pair[0], pair[1])).collect();

        let links = graph
            .edges()
            .map(|(source, target)| GraphLink {
                source,
                target,
                link_type: if source.is_process() {
                    LinkType::Request
                } else {
                    LinkType::Alloc
                },
                in_cycle: cycle_links.contains(&(source, target)),
            })
            .collect();

        GraphState {
            processes: (0..graph.process_count()).collect(),
            resources: (0..graph.resource_count()).collect(),
            links,
        }
    }
}
