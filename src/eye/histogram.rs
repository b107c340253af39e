// src/eye/histogram.rs
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::eye::EyeWidthError;

/// Read-only eye density grid produced by an upstream eye-pattern accumulator.
///
/// Rows are voltage bins (row 0 is the bottom of the voltage range), columns are
/// time bins spanning two unit intervals.
#[derive(Clone, Debug, PartialEq)]
pub struct EyeHistogram {
    data: Array2<f32>, // rows x columns
    center_voltage: f32,
    voltage_range: f32,
    ui_width_fs: f64,
    timescale: i64,
    trigger_phase: i64,
}

impl EyeHistogram {
    /// Wraps an existing grid. Geometry is checked later, when a measurement
    /// derives its [`EyeGeometry`], so degenerate upstream data can still be carried.
    pub fn new(
        data: Array2<f32>,
        center_voltage: f32,
        voltage_range: f32,
        ui_width_fs: f64,
    ) -> Self {
        Self {
            data,
            center_voltage,
            voltage_range,
            ui_width_fs,
            timescale: 1,
            trigger_phase: 0,
        }
    }

    /// Builds a histogram from row-major cells.
    pub fn from_vec(
        height: usize,
        width: usize,
        cells: Vec<f32>,
        center_voltage: f32,
        voltage_range: f32,
        ui_width_fs: f64,
    ) -> Result<Self, EyeWidthError> {
        let actual = cells.len();
        let expected = height
            .checked_mul(width)
            .ok_or(EyeWidthError::ShapeMismatch {
                expected: usize::MAX,
                actual,
            })?;
        let data = Array2::from_shape_vec((height, width), cells)
            .map_err(|_| EyeWidthError::ShapeMismatch { expected, actual })?;
        Ok(Self::new(data, center_voltage, voltage_range, ui_width_fs))
    }

    pub fn with_timebase(mut self, timescale: i64, trigger_phase: i64) -> Self {
        self.timescale = timescale;
        self.trigger_phase = trigger_phase;
        self
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn center_voltage(&self) -> f32 {
        self.center_voltage
    }

    pub fn voltage_range(&self) -> f32 {
        self.voltage_range
    }

    /// One unit interval in femtoseconds.
    pub fn ui_width(&self) -> f64 {
        self.ui_width_fs
    }

    pub fn timescale(&self) -> i64 {
        self.timescale
    }

    pub fn trigger_phase(&self) -> i64 {
        self.trigger_phase
    }

    pub fn intensity(&self, row: usize, col: usize) -> f32 {
        self.data[[row, col]]
    }

    pub fn row(&self, row: usize) -> ArrayView1<'_, f32> {
        self.data.row(row)
    }

    pub fn data(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }
}

/// Quantities derived once per measurement from a histogram's metadata.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeGeometry {
    pub height: usize,
    pub width: usize,
    pub volts_per_row: f64,
    pub volts_at_bottom: f64,
    pub fs_per_pixel: f64,
    pub x_center: usize,
}

impl EyeGeometry {
    pub fn of(histogram: &EyeHistogram) -> Result<Self, EyeWidthError> {
        let height = histogram.height();
        let width = histogram.width();
        let voltage_range = f64::from(histogram.voltage_range());
        let ui_width_fs = histogram.ui_width();
        if height == 0 {
            return Err(EyeWidthError::InvalidGeometry { field: "height", value: 0.0 });
        }
        if width == 0 {
            return Err(EyeWidthError::InvalidGeometry { field: "width", value: 0.0 });
        }
        // Negated comparisons also reject NaN.
        if !(voltage_range > 0.0) {
            return Err(EyeWidthError::InvalidGeometry {
                field: "voltage range",
                value: voltage_range,
            });
        }
        if !(ui_width_fs > 0.0) {
            return Err(EyeWidthError::InvalidGeometry {
                field: "unit interval width",
                value: ui_width_fs,
            });
        }
        Ok(Self {
            height,
            width,
            volts_per_row: voltage_range / height as f64,
            volts_at_bottom: f64::from(histogram.center_voltage()) - voltage_range / 2.0,
            // The grid spans two unit intervals horizontally.
            fs_per_pixel: (2.0 * ui_width_fs) / width as f64,
            x_center: width / 2,
        })
    }

    /// Bottom edge of `row` in millivolts, rounded half away from zero.
    pub fn row_offset_mv(&self, row: usize) -> i64 {
        let mv = row as f64 * self.volts_per_row * 1000.0 + self.volts_at_bottom * 1000.0;
        mv.round() as i64
    }

    /// Height of one row in millivolts, rounded half away from zero.
    pub fn row_duration_mv(&self) -> i64 {
        (self.volts_per_row * 1000.0).round() as i64
    }

    pub fn span_fs(&self, columns: usize) -> f64 {
        self.fs_per_pixel * columns as f64
    }
}

/// On-disk JSON form of an eye histogram, cells row-major from the bottom row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EyeHistogramFile {
    pub width: usize,
    pub height: usize,
    pub center_voltage: f32,
    pub voltage_range: f32,
    pub ui_width_fs: f64,
    #[serde(default = "default_timescale")]
    pub timescale: i64,
    #[serde(default)]
    pub trigger_phase: i64,
    pub data: Vec<f32>,
}

fn default_timescale() -> i64 {
    1
}

impl EyeHistogramFile {
    pub fn into_histogram(self) -> Result<EyeHistogram, EyeWidthError> {
        let histogram = EyeHistogram::from_vec(
            self.height,
            self.width,
            self.data,
            self.center_voltage,
            self.voltage_range,
            self.ui_width_fs,
        )?;
        Ok(histogram.with_timebase(self.timescale, self.trigger_phase))
    }
}
