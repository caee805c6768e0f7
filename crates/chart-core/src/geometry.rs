//! Pie-slice geometry.
//!
//! Converts the record list into cumulative angular spans. Angle 0 is at 12
//! o'clock and angles grow clockwise; a full turn is `TAU` radians. Slice
//! order follows list order; slices are never sorted by value.

use crate::models::ExpenseRecord;

/// One full turn in radians.
pub const TAU: f64 = std::f64::consts::TAU;

/// A start/end angle pair in radians, `0 <= start <= end <= TAU`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceAngles {
    pub start: f64,
    pub end: f64,
}

impl SliceAngles {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Angular span of this slice.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Angle halfway through the slice, used for labels.
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// A record paired with its computed slice geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub record: ExpenseRecord,
    pub angles: SliceAngles,
    /// This record's share of the total cost, in `[0, 1]`.
    pub fraction: f64,
}

/// Compute slice geometry for the current record list.
///
/// Each record's span is proportional to its cost relative to the sum of all
/// costs. A total of zero (empty list, or every cost zero) yields zero-width
/// slices rather than dividing by zero; zero-cost records always get a
/// zero-width slice at their cumulative position.
pub fn compute_slices(records: &[ExpenseRecord]) -> Vec<Slice> {
    let total: f64 = records.iter().map(|r| r.cost.max(0.0)).sum();

    let mut slices = Vec::with_capacity(records.len());
    let mut cursor = 0.0_f64;

    for record in records {
        let fraction = if total > 0.0 {
            record.cost.max(0.0) / total
        } else {
            0.0
        };
        let start = cursor;
        let end = cursor + fraction * TAU;
        cursor = end;
        slices.push(Slice {
            record: record.clone(),
            angles: SliceAngles::new(start, end),
            fraction,
        });
    }

    slices
}
