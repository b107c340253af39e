//! Per-row search for the inner edges of the eye opening.
//!
//! The scan walks outward from the horizontal center. On the left half it keeps
//! the rightmost occupied column, on the right half the leftmost one, so the
//! result is the innermost boundary of each lobe. A row with nothing occupied
//! keeps the defaults `(0, width - 1)`, which is indistinguishable from a fully
//! open eye.
//!
//! With an even width the first step (`dx = 0`) reads the center column for both
//! sides. Both updates are monotone, so this double read is harmless.
use ndarray::ArrayView1;

/// A cell counts as occupied when its intensity is strictly above this floor.
pub const OCCUPANCY_FLOOR: f32 = f32::EPSILON;

/// Column pair bounding the eye opening in one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowEdges {
    pub left: usize,
    pub right: usize,
}

impl RowEdges {
    /// Opening in columns.
    pub fn span(&self) -> usize {
        self.right - self.left
    }
}

pub fn scan_row(row: ArrayView1<'_, f32>, x_center: usize) -> RowEdges {
    let width = row.len();
    debug_assert!(width > 0);
    debug_assert!(x_center < width);
    let mut left = 0;
    let mut right = width - 1;
    for dx in 0..x_center {
        let x = x_center - dx;
        if row[x] > OCCUPANCY_FLOOR {
            left = left.max(x);
        }
        let x = x_center + dx;
        if row[x] > OCCUPANCY_FLOOR {
            right = right.min(x);
        }
    }
    debug_assert!(left <= x_center && x_center <= right, "eye edges crossed: {left} > {right}");
    RowEdges { left, right }
}
