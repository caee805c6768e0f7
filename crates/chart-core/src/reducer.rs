//! Change-event reducer for the local record list.
//!
//! The list mirrors the feed's subscription order: snapshots arrive sorted by
//! cost ascending, `Added` appends, `Modified` replaces in place, `Removed`
//! deletes. The list is deliberately never re-sorted after a local mutation;
//! slice order tracks feed order, not current cost order.

use tracing::warn;

use crate::error::{ChartError, Result};
use crate::models::{ChangeBatch, ChangeEvent, ChangeKind, ExpenseRecord};

/// Apply one change event to the record list.
///
/// - `Added`: append the record. If the id is already present the existing
///   record is replaced in place instead, keeping ids unique in the list.
/// - `Modified`: replace the record with the matching id. Returns
///   [`ChartError::RecordNotFound`] and leaves the list unchanged when the id
///   is absent; the condition is non-fatal and callers log it.
/// - `Removed`: drop the record with the matching id; absent ids are a no-op.
pub fn apply_event(records: &mut Vec<ExpenseRecord>, event: &ChangeEvent) -> Result<()> {
    match event.kind {
        ChangeKind::Added => {
            if let Some(existing) = records.iter_mut().find(|r| r.id == event.record.id) {
                warn!(id = %event.record.id, "added event for an id already in the list; replacing");
                *existing = event.record.clone();
            } else {
                records.push(event.record.clone());
            }
            Ok(())
        }
        ChangeKind::Modified => match records.iter_mut().find(|r| r.id == event.record.id) {
            Some(existing) => {
                *existing = event.record.clone();
                Ok(())
            }
            None => Err(ChartError::RecordNotFound(event.record.id.clone())),
        },
        ChangeKind::Removed => {
            records.retain(|r| r.id != event.record.id);
            Ok(())
        }
    }
}

/// Apply a whole batch in order.
///
/// Per-event inconsistencies are logged at warn level and skipped rather than
/// aborting the batch; the UI has no mechanism to interrupt rendering.
/// Returns the number of events that were applied cleanly.
pub fn apply_batch(records: &mut Vec<ExpenseRecord>, batch: &ChangeBatch) -> usize {
    let mut applied = 0;
    for event in &batch.events {
        match apply_event(records, event) {
            Ok(()) => applied += 1,
            Err(e) => warn!(error = %e, kind = ?event.kind, "inconsistent change event ignored"),
        }
    }
    applied
}

/// Sum of all record costs.
pub fn total_cost(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.cost).sum()
}
