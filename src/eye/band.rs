use std::ops::RangeInclusive;

use crate::eye::EyeGeometry;

/// Inclusive range of histogram rows covered by a voltage band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub start_row: usize,
    pub end_row: usize,
}

impl Band {
    /// Maps a voltage pair onto rows. The pair may be given in either order;
    /// each end is rounded to the nearest row and clamped into the grid.
    pub fn from_voltages(v_start: f32, v_end: f32, geometry: &EyeGeometry) -> Self {
        let (v_start, v_end) = if v_start > v_end {
            (v_end, v_start)
        } else {
            (v_start, v_end)
        };
        let start_row = voltage_to_row(v_start, geometry);
        let end_row = voltage_to_row(v_end, geometry);
        // A NaN end skips the swap above, so order the rows again.
        Self {
            start_row: start_row.min(end_row),
            end_row: start_row.max(end_row),
        }
    }

    pub fn rows(&self) -> RangeInclusive<usize> {
        self.start_row..=self.end_row
    }

    pub fn len(&self) -> usize {
        self.end_row - self.start_row + 1
    }
}

fn voltage_to_row(voltage: f32, geometry: &EyeGeometry) -> usize {
    let raw = ((f64::from(voltage) - geometry.volts_at_bottom) / geometry.volts_per_row).round();
    let top = geometry.height - 1;
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= top as f64 {
        top
    } else {
        raw as usize
    }
}
