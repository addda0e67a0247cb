//! Shape and sign checks for incoming snapshots
//!
//! Everything downstream of [`validate`] indexes the matrices directly and
//! adds allocations together, so this is the single place that guarantees
//! rows have the declared width, entries are non-negative, and the per
//! resource allocation sums fit in an `i64`.

use crate::core::error::{DetectionError, MatrixKind};
use crate::core::types::{Matrix, Snapshot};

/// Validate a snapshot before analysis
///
/// Shape problems are reported before sign problems. Within each class the
/// first offender is reported, scanning allocation, then request, then the
/// declared totals, each in row-major order.
///
/// # Errors
/// * [`DetectionError::InvalidShape`] - a matrix or the totals vector does not
///   match `process_count` x `resource_count`
/// * [`DetectionError::NegativeValue`] - any entry is below zero
/// * [`DetectionError::Overflow`] - the allocated units of one resource do not
///   fit in an `i64`
pub fn validate(snapshot: &Snapshot) -> Result<(), DetectionError> {
    let (rows, columns) = (snapshot.process_count, snapshot.resource_count);

    check_shape(&snapshot.allocation, MatrixKind::Allocation, rows, columns)?;
    check_shape(&snapshot.request, MatrixKind::Request, rows, columns)?;
    if let Some(totals) = &snapshot.total_resources
        && totals.len() != columns
    {
        return Err(DetectionError::InvalidShape {
            matrix: MatrixKind::TotalResources,
            row: None,
            expected: columns,
            actual: totals.len(),
        });
    }

    check_signs(&snapshot.allocation, MatrixKind::Allocation)?;
    check_signs(&snapshot.request, MatrixKind::Request)?;
    if let Some(totals) = &snapshot.total_resources
        && let Some((column, &value)) = totals.iter().enumerate().find(|(_, v)| **v < 0)
    {
        return Err(DetectionError::NegativeValue {
            matrix: MatrixKind::TotalResources,
            row: 0,
            column,
            value,
        });
    }

    for resource in 0..columns {
        column_sum(&snapshot.allocation, resource).ok_or(DetectionError::Overflow { resource })?;
    }

    Ok(())
}

/// Sum of one column, or `None` on overflow
///
/// Only meaningful on a validated matrix; the validator uses it to rule out
/// overflow so later callers can rely on it returning `Some`.
pub(crate) fn column_sum(matrix: &Matrix, column: usize) -> Option<i64> {
    matrix
        .iter()
        .try_fold(0i64, |acc, row| acc.checked_add(row[column]))
}

fn check_shape(
    matrix: &Matrix,
    kind: MatrixKind,
    rows: usize,
    columns: usize,
) -> Result<(), DetectionError> {
    if matrix.len() != rows {
        return Err(DetectionError::InvalidShape {
            matrix: kind,
            row: None,
            expected: rows,
            actual: matrix.len(),
        });
    }

    if let Some((row, values)) = matrix.iter().enumerate().find(|(_, r)| r.len() != columns) {
        return Err(DetectionError::InvalidShape {
            matrix: kind,
            row: Some(row),
            expected: columns,
            actual: values.len(),
        });
    }

    Ok(())
}

fn check_signs(matrix: &Matrix, kind: MatrixKind) -> Result<(), DetectionError> {
    for (row, values) in matrix.iter().enumerate() {
        if let Some((column, &value)) = values.iter().enumerate().find(|(_, v)| **v < 0) {
            return Err(DetectionError::NegativeValue {
                matrix: kind,
                row,
                column,
                value,
            });
        }
    }
    Ok(())
}
