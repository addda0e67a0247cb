use crate::core::error::DetectionError;
use crate::core::types::Snapshot;
use crate::core::validator::column_sum;

/// Derive the free units of each resource type
///
/// With declared totals, `available[r]` is the total minus everything
/// allocated. Without them, no unit is assumed to exist beyond what is
/// already held, so every entry is zero and a process can only be served by
/// another process releasing its allocation.
///
/// The snapshot must already have passed [`crate::core::validator::validate`].
///
/// # Errors
/// Returns [`DetectionError::NegativeAvailability`] if a resource has more
/// units allocated than its declared total.
pub fn resolve_available(snapshot: &Snapshot) -> Result<Vec<i64>, DetectionError> {
    let Some(totals) = &snapshot.total_resources else {
        return Ok(vec![0; snapshot.resource_count]);
    };

    totals
        .iter()
        .enumerate()
        .map(|(resource, &total)| {
            let allocated = column_sum(&snapshot.allocation, resource)
                .ok_or(DetectionError::Overflow { resource })?;
            if allocated > total {
                return Err(DetectionError::NegativeAvailability {
                    resource,
                    total,
                    allocated,
                });
            }
            Ok(total - allocated)
        })
        .collect()
}
