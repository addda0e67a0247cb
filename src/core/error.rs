//! Error types for snapshot validation and availability resolution
//!
//! Every error is raised before the reduction loop runs, so a failed
//! detection never exposes partial results. All of them describe malformed
//! input: retrying with the same snapshot gives the same error.

use crate::core::types::{ProcessId, ResourceId};
use std::fmt;

/// Which input vector or matrix an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    Allocation,
    Request,
    TotalResources,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixKind::Allocation => f.write_str("allocation"),
            MatrixKind::Request => f.write_str("request"),
            MatrixKind::TotalResources => f.write_str("totalResources"),
        }
    }
}

/// Errors that can occur before a detection run produces a result
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DetectionError {
    /// A matrix or vector does not match the declared counts
    ///
    /// `row` is `None` when the number of rows (or the vector length) is
    /// wrong, and `Some(p)` when row `p` has the wrong number of columns.
    #[error("{matrix} has invalid shape at {}: expected {expected}, found {actual}", row_label(.row))]
    InvalidShape {
        matrix: MatrixKind,
        row: Option<ProcessId>,
        expected: usize,
        actual: usize,
    },

    /// An entry is below zero
    ///
    /// For the totals vector `row` is always 0.
    #[error("{matrix} entry [{row}][{column}] is negative ({value})")]
    NegativeValue {
        matrix: MatrixKind,
        row: usize,
        column: usize,
        value: i64,
    },

    /// More units are allocated than the declared total
    #[error(
        "resource R{resource} has {allocated} units allocated but only {total} declared in total"
    )]
    NegativeAvailability {
        resource: ResourceId,
        total: i64,
        allocated: i64,
    },

    /// The allocated units of a resource do not fit in a 64-bit counter
    #[error("allocated units of resource R{resource} overflow a 64-bit counter")]
    Overflow { resource: ResourceId },
}

fn row_label(row: &Option<ProcessId>) -> String {
    match row {
        Some(p) => format!("row {p}"),
        None => "row count".to_string(),
    }
}
