//! # deadlock-witness
//!
//! Snapshot deadlock detection for processes competing over multi-instance
//! resources, with an explicit witness cycle for visualization.
//!
//! Given how many units of each resource every process holds and still
//! requests, the detector runs a safety reduction to find the processes that
//! can never finish, then walks the process/resource wait-for graph to
//! extract one concrete circular wait among them.
//!
//! ## Features
//!
//! - Deterministic detection: the same snapshot always yields the same result
//! - Witness cycles as alternating `P<n>` / `R<n>` paths
//! - Parallel batch detection
//! - JSON-lines detection log and viewer handoff (`logging-and-visualization`)
//!
//! ## Example
//!
//! ```
//! use deadlock_witness::{Snapshot, detect};
//!
//! let snapshot: Snapshot = serde_json::from_str(
//!     r#"{"processes":2,"resources":1,"allocations":[[1],[0]],"requests":[[0],[1]]}"#,
//! )
//! .unwrap();
//!
//! // P0 asks for nothing, finishes, and hands R0 to P1
//! let result = detect(&snapshot).unwrap();
//! assert!(!result.is_deadlocked);
//! ```

mod core;
pub use crate::core::{
    Analysis, DeadlockWitness, DetectOptions, DetectionError, DetectionReport, DetectionResult,
    Detector, MatrixKind, NodeId, ParseNodeIdError, ProcessId, ResourceId, Snapshot, analyze,
    detect, detect_batch, detect_with,
    graph::{WaitForGraph, extract_cycle, verify_cycle},
    logger::{GraphLink, GraphState, LinkType},
    reduction::{ReductionOutcome, reduce},
    run_parallel,
};

#[cfg(feature = "logging-and-visualization")]
pub use crate::core::logger::{CombinedLogEntry, EventLogger, LogEntry, Outcome};

/// Availability resolution and input validation, exposed for callers that
/// drive the pipeline step by step
pub mod checks {
    pub use crate::core::availability::resolve_available;
    pub use crate::core::validator::validate;
}

#[cfg(feature = "logging-and-visualization")]
pub mod showcase;
#[cfg(feature = "logging-and-visualization")]
pub use showcase::{showcase, showcase_this, showcase_url};
