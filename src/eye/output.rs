use serde::Serialize;

use crate::eye::{BandScan, EyeGeometry, EyeHistogram};
use crate::filter::Unit;

/// Eye width measured in one voltage row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowWidthSample {
    pub row_index: usize,
    pub offset_mv: i64,
    pub duration_mv: i64,
    pub width_fs: f64,
}

/// Sparse analog waveform over a millivolt x axis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SparseWaveform {
    pub timescale: i64,
    pub trigger_phase: i64,
    pub x_unit: Unit,
    pub y_unit: Unit,
    pub samples: Vec<RowWidthSample>,
    #[serde(skip)]
    pub(crate) revision: u64,
}

impl Default for SparseWaveform {
    fn default() -> Self {
        Self {
            timescale: 1,
            trigger_phase: 0,
            x_unit: Unit::Millivolts,
            y_unit: Unit::Femtoseconds,
            samples: Vec::new(),
            revision: 0,
        }
    }
}

impl SparseWaveform {
    /// Empty waveform carrying the timebase of `histogram`.
    pub fn for_histogram(histogram: &EyeHistogram, capacity: usize) -> Self {
        Self {
            timescale: histogram.timescale(),
            trigger_phase: histogram.trigger_phase(),
            samples: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn offsets(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.iter().map(|s| s.offset_mv)
    }

    pub fn durations(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.iter().map(|s| s.duration_mv)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.width_fs)
    }

    /// Number of times the buffer was marked modified on the host.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Everything one measurement produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EyeWidthReport {
    pub widthslice: SparseWaveform,
    /// Narrowest per-row opening in the band, NaN when nothing was measured.
    pub min_width_fs: f64,
    /// Distance between the outermost left and right edges seen in the band.
    pub envelope_width_fs: f64,
}

impl EyeWidthReport {
    /// Output reported when the input cannot be measured.
    pub fn invalid() -> Self {
        Self {
            widthslice: SparseWaveform::default(),
            min_width_fs: f64::NAN,
            envelope_width_fs: f64::NAN,
        }
    }
}

pub fn assemble(
    histogram: &EyeHistogram,
    geometry: &EyeGeometry,
    scan: BandScan,
) -> EyeWidthReport {
    let BandScan {
        rows,
        envelope,
        narrowest,
    } = scan;
    let duration_mv = geometry.row_duration_mv();
    let mut widthslice = SparseWaveform::for_histogram(histogram, rows.len());
    widthslice.samples.extend(rows.iter().map(|row| RowWidthSample {
        row_index: row.row,
        offset_mv: geometry.row_offset_mv(row.row),
        duration_mv,
        width_fs: geometry.span_fs(row.edges.span()),
    }));
    EyeWidthReport {
        widthslice,
        min_width_fs: narrowest.map_or(f64::NAN, |span| geometry.span_fs(span)),
        envelope_width_fs: envelope
            .map_or(f64::NAN, |envelope| geometry.span_fs(envelope.span())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eye::{RowEdges, WidthAggregator};
    use ndarray::Array2;

    #[test]
    fn samples_follow_row_order_and_geometry() {
        let hist = EyeHistogram::new(Array2::zeros((2, 4)), 0.0, 1.0, 1000.0).with_timebase(7, 3);
        let geometry = EyeGeometry::of(&hist).unwrap();
        let mut aggregator = WidthAggregator::default();
        aggregator.add_row(0, RowEdges { left: 0, right: 3 });
        aggregator.add_row(1, RowEdges { left: 1, right: 2 });
        let report = assemble(&hist, &geometry, aggregator.finish());
        let wave = &report.widthslice;
        assert_eq!(wave.timescale, 7);
        assert_eq!(wave.trigger_phase, 3);
        assert_eq!(wave.offsets().collect::<Vec<_>>(), vec![-500, 0]);
        assert_eq!(wave.durations().collect::<Vec<_>>(), vec![500, 500]);
        assert_eq!(wave.values().collect::<Vec<_>>(), vec![1500.0, 500.0]);
        assert_eq!(report.min_width_fs, 500.0);
        assert_eq!(report.envelope_width_fs, 1500.0);
    }

    #[test]
    fn no_rows_reports_nan() {
        let hist = EyeHistogram::new(Array2::zeros((2, 4)), 0.0, 1.0, 1000.0);
        let geometry = EyeGeometry::of(&hist).unwrap();
        let report = assemble(&hist, &geometry, BandScan::default());
        assert!(report.widthslice.is_empty());
        assert!(report.min_width_fs.is_nan());
        assert!(report.envelope_width_fs.is_nan());
    }

    #[test]
    fn nan_serializes_as_null() {
        let json = serde_json::to_value(EyeWidthReport::invalid()).unwrap();
        assert!(json["min_width_fs"].is_null());
        assert_eq!(json["widthslice"]["samples"].as_array().unwrap().len(), 0);
        assert_eq!(json["widthslice"]["x_unit"], "mV");
    }
}
