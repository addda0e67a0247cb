use crate::core::logger::GraphState;
use crate::core::types::{DetectionResult, ProcessId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A detection result together with what a viewer needs to draw it
///
/// Passed to the deadlock callback and written to the detection log. Unlike
/// [`DetectionResult`] it carries a timestamp, so two reports for the same
/// snapshot are not equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    /// The response contract for this run
    pub result: DetectionResult,

    /// Processes, resources and holds/waits links, with the witness cycle marked
    pub graph: GraphState,

    /// Order in which the reduction completed processes
    ///
    /// For a snapshot without deadlock this is a safe sequence: running the
    /// processes in this order lets every one of them finish.
    pub completion_order: Vec<ProcessId>,

    /// ISO-8601 timestamp of when the report was created
    pub timestamp: String,
}

impl DetectionReport {
    pub fn new(result: DetectionResult, graph: GraphState, completion_order: Vec<ProcessId>) -> Self {
        DetectionReport {
            result,
            graph,
            completion_order,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
