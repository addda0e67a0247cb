use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Process identifier type
///
/// Row index of a process in the allocation and request matrices.
pub type ProcessId = usize;

/// Resource identifier type
///
/// Column index of a resource type in the allocation and request matrices.
pub type ResourceId = usize;

/// One row-major matrix of unit counts, `processes` rows by `resources` columns
pub type Matrix = Vec<Vec<i64>>;

/// Immutable input to one detection run
///
/// Entries are signed so that malformed input can be reported as a negative
/// value instead of failing at deserialization. Once validated every entry is
/// non-negative and every row has `resource_count` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of processes (P)
    #[serde(rename = "processes")]
    pub process_count: usize,
    /// Number of resource types (R)
    #[serde(rename = "resources")]
    pub resource_count: usize,
    /// Units of resource `r` currently held by process `p`
    #[serde(rename = "allocations")]
    pub allocation: Matrix,
    /// Units of resource `r` process `p` is still waiting to acquire
    #[serde(rename = "requests")]
    pub request: Matrix,
    /// Declared total units per resource type, if known
    ///
    /// When absent, nothing beyond what is already allocated is assumed to
    /// exist, so the initial available vector is all zeros.
    #[serde(
        rename = "totalResources",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_resources: Option<Vec<i64>>,
}

impl Snapshot {
    /// Create a snapshot without declared resource totals
    ///
    /// The counts are taken from the matrices: the number of allocation rows
    /// and the width of the first allocation row.
    pub fn new(allocation: Matrix, request: Matrix) -> Self {
        let process_count = allocation.len();
        let resource_count = allocation.first().map_or(0, Vec::len);
        Snapshot {
            process_count,
            resource_count,
            allocation,
            request,
            total_resources: None,
        }
    }

    /// Attach declared resource totals
    pub fn with_totals(mut self, totals: Vec<i64>) -> Self {
        self.total_resources = Some(totals);
        self
    }
}

/// A node of the wait-for graph
///
/// Displayed (and serialized) as `P<id>` for processes and `R<id>` for
/// resources, which is the identifier format downstream renderers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Process(ProcessId),
    Resource(ResourceId),
}

impl NodeId {
    pub fn is_process(&self) -> bool {
        matches!(self, NodeId::Process(_))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Process(id) => write!(f, "P{id}"),
            NodeId::Resource(id) => write!(f, "R{id}"),
        }
    }
}

/// Error returned when a string is not a `P<n>` or `R<n>` node identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node identifier '{0}', expected P<n> or R<n>")]
pub struct ParseNodeIdError(pub String);

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseNodeIdError(s.to_string());
        let (kind, digits) = s.split_at_checked(1).ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let id = digits.parse::<usize>().map_err(|_| invalid())?;
        match kind {
            "P" => Ok(NodeId::Process(id)),
            "R" => Ok(NodeId::Resource(id)),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Represents the result of a deadlock detection
///
/// This is the response contract handed to the transport and rendering
/// layers. It contains no timestamps or other run-dependent data, so
/// detecting twice on the same snapshot yields equal results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Whether any process can never finish
    pub is_deadlocked: bool,

    /// Processes that never finish under the reduction, ascending
    pub deadlocked_processes: Vec<ProcessId>,

    /// Witness cycle through the wait-for graph
    ///
    /// Alternates process and resource nodes and starts and ends on the same
    /// node, e.g. `["P0", "R1", "P1", "R0", "P0"]`. Empty when there is no
    /// deadlock or when no single cycle explains it.
    pub cycle_path: Vec<NodeId>,
}
