use log::debug;

use crate::eye::{
    assemble, scan_band, Band, EyeGeometry, EyeHistogram, EyeWidthError, EyeWidthReport,
};

/// Measures the eye opening of every row between two voltages.
///
/// The voltages may be given in either order. The transform is pure: the same
/// histogram and band always produce the same report.
pub fn measure_eye_width(
    histogram: &EyeHistogram,
    start_voltage: f32,
    end_voltage: f32,
) -> Result<EyeWidthReport, EyeWidthError> {
    let geometry = EyeGeometry::of(histogram)?;
    let band = Band::from_voltages(start_voltage, end_voltage, &geometry);
    debug!(
        "eye width over rows {}..={} ({} x {} grid, {} fs/pixel)",
        band.start_row, band.end_row, geometry.height, geometry.width, geometry.fs_per_pixel
    );
    let scan = scan_band(histogram, &geometry, band);
    Ok(assemble(histogram, &geometry, scan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn histogram(
        height: usize,
        width: usize,
        ui: f64,
        center: f32,
        range: f32,
        occupied: &[(usize, usize)],
    ) -> EyeHistogram {
        let mut data = Array2::<f32>::zeros((height, width));
        for &(row, col) in occupied {
            data[[row, col]] = 1.0;
        }
        EyeHistogram::new(data, center, range, ui)
    }

    fn sample_triples(report: &EyeWidthReport) -> Vec<(i64, i64, f64)> {
        report
            .widthslice
            .samples
            .iter()
            .map(|s| (s.offset_mv, s.duration_mv, s.width_fs))
            .collect()
    }

    #[test]
    fn two_row_eye_with_outer_lobes() {
        let hist = histogram(2, 4, 1000.0, 0.0, 1.0, &[(0, 0), (0, 3), (1, 0), (1, 3)]);
        let report = measure_eye_width(&hist, -0.5, 0.5).unwrap();
        assert_eq!(sample_triples(&report), vec![(-500, 500, 1500.0), (0, 500, 1500.0)]);
        assert_eq!(report.min_width_fs, 1500.0);
    }

    #[test]
    fn reversed_band_gives_identical_report() {
        let hist = histogram(2, 4, 1000.0, 0.0, 1.0, &[(0, 0), (0, 3), (1, 0), (1, 3)]);
        let forward = measure_eye_width(&hist, -0.5, 0.5).unwrap();
        let reversed = measure_eye_width(&hist, 0.5, -0.5).unwrap();
        assert_eq!(forward, reversed);
        assert_eq!(sample_triples(&reversed), vec![(-500, 500, 1500.0), (0, 500, 1500.0)]);
    }

    #[test]
    fn narrow_middle_row_sets_the_minimum() {
        let hist = histogram(3, 5, 2000.0, 0.0, 0.3, &[(1, 1), (1, 3)]);
        let report = measure_eye_width(&hist, -0.15, 0.15).unwrap();
        let widths: Vec<f64> = report.widthslice.values().collect();
        assert_eq!(widths, vec![3200.0, 1600.0, 3200.0]);
        assert_eq!(report.min_width_fs, 1600.0);
        assert_eq!(report.envelope_width_fs, 3200.0);
    }

    #[test]
    fn equal_voltages_measure_one_row() {
        let hist = histogram(8, 10, 1000.0, 0.0, 1.0, &[(3, 3), (3, 6), (4, 4)]);
        // Row 3 sits at -0.5 + 3 * 0.125.
        let report = measure_eye_width(&hist, -0.125, -0.125).unwrap();
        assert_eq!(report.widthslice.len(), 1);
        let sample = &report.widthslice.samples[0];
        assert_eq!(sample.row_index, 3);
        assert_eq!(sample.width_fs, 200.0 * 3.0);
        assert_eq!(report.min_width_fs, sample.width_fs);
    }

    #[test]
    fn empty_grid_reports_full_opening() {
        let hist = histogram(4, 6, 1500.0, 0.0, 1.0, &[]);
        let report = measure_eye_width(&hist, -10.0, 10.0).unwrap();
        assert_eq!(report.widthslice.len(), 4);
        let full = 500.0 * 5.0;
        assert!(report.widthslice.values().all(|w| w == full));
        assert_eq!(report.min_width_fs, full);
    }

    #[test]
    fn far_away_band_clamps_to_edge_rows() {
        let hist = histogram(4, 6, 1500.0, 0.0, 1.0, &[]);
        let low = measure_eye_width(&hist, -9.0, -8.0).unwrap();
        assert_eq!(low.widthslice.samples[0].row_index, 0);
        assert_eq!(low.widthslice.len(), 1);
        let high = measure_eye_width(&hist, 8.0, 9.0).unwrap();
        assert_eq!(high.widthslice.samples[0].row_index, 3);
        assert_eq!(high.widthslice.len(), 1);
    }

    #[test]
    fn degenerate_histograms_are_invalid_input() {
        let hist = histogram(4, 6, 0.0, 0.0, 1.0, &[]);
        assert!(matches!(
            measure_eye_width(&hist, 0.0, 0.0),
            Err(EyeWidthError::InvalidGeometry { .. })
        ));
        let hist = histogram(0, 6, 1000.0, 0.0, 1.0, &[]);
        assert!(measure_eye_width(&hist, 0.0, 0.0).is_err());
    }

    #[test]
    fn single_pixel_histogram() {
        let hist = histogram(1, 1, 1000.0, 0.0, 1.0, &[(0, 0)]);
        let report = measure_eye_width(&hist, 0.0, 0.0).unwrap();
        assert_eq!(report.widthslice.len(), 1);
        assert_eq!(report.min_width_fs, 0.0);
    }

    #[test]
    fn two_column_grid_with_empty_rows_stays_open() {
        let hist = histogram(2, 2, 1000.0, 0.0, 1.0, &[(1, 1)]);
        let report = measure_eye_width(&hist, -0.5, 0.5).unwrap();
        let widths: Vec<f64> = report.widthslice.values().collect();
        // Row 0 is empty: (0, 1). Row 1 has its center column occupied: (1, 1).
        assert_eq!(widths, vec![1000.0, 0.0]);
        assert_eq!(report.min_width_fs, 0.0);
    }

    #[test]
    fn infinite_ui_width_propagates_as_nan() {
        let hist = histogram(1, 1, f64::INFINITY, 0.0, 1.0, &[]);
        let report = measure_eye_width(&hist, 0.0, 0.0).unwrap();
        assert!(report.widthslice.samples[0].width_fs.is_nan());
    }

    /// Eye with lobes whose inner edges are placed at known columns per row.
    fn random_eye(rng: &mut StdRng) -> (EyeHistogram, Vec<(usize, usize)>) {
        let height = rng.gen_range(1..24);
        let width = rng.gen_range(2..40);
        let x_center = width / 2;
        let mut data = Array2::<f32>::zeros((height, width));
        let mut edges = Vec::with_capacity(height);
        for row in 0..height {
            let left_filled = rng.gen_bool(0.8);
            let left = if left_filled {
                let left = rng.gen_range(1..=x_center);
                for col in 1..=left {
                    data[[row, col]] = rng.gen_range(0.01..1.0);
                }
                left
            } else {
                0
            };
            let right_filled = rng.gen_bool(0.8);
            let right = if right_filled {
                let right = rng.gen_range(x_center..=2 * x_center - 1);
                for col in right..width {
                    data[[row, col]] = rng.gen_range(0.01..1.0);
                }
                right
            } else {
                width - 1
            };
            // An occupied center column closes both sides. With width 2 the
            // default right edge is the center itself, so only filled lobes count.
            if (left_filled && left == x_center) || (right_filled && right == x_center) {
                edges.push((x_center, x_center));
            } else {
                edges.push((left, right));
            }
        }
        let center = rng.gen_range(-1.0..1.0);
        let range = rng.gen_range(0.05..2.0);
        let ui = rng.gen_range(10.0..100_000.0);
        (EyeHistogram::new(data, center, range, ui), edges)
    }

    fn random_band(rng: &mut StdRng, hist: &EyeHistogram) -> (f32, f32) {
        let bottom = hist.center_voltage() - hist.voltage_range() / 2.0;
        let span = hist.voltage_range() * 1.5;
        (
            rng.gen_range(bottom - span / 4.0..bottom + span),
            rng.gen_range(bottom - span / 4.0..bottom + span),
        )
    }

    #[test]
    fn random_eyes_satisfy_measurement_properties() {
        let mut rng = StdRng::seed_from_u64(0x00e1_e1d7);
        for _ in 0..200 {
            let (hist, edges) = random_eye(&mut rng);
            let (v_start, v_end) = random_band(&mut rng, &hist);
            let geometry = EyeGeometry::of(&hist).unwrap();
            let band = Band::from_voltages(v_start, v_end, &geometry);
            let report = measure_eye_width(&hist, v_start, v_end).unwrap();

            assert_eq!(report.widthslice.len(), band.len());
            for sample in &report.widthslice.samples {
                assert!(sample.width_fs >= 0.0);
                assert!(report.min_width_fs <= sample.width_fs);
                let (left, right) = edges[sample.row_index];
                assert_eq!(sample.width_fs, geometry.fs_per_pixel * (right - left) as f64);
            }
            let rows: Vec<usize> = report.widthslice.samples.iter().map(|s| s.row_index).collect();
            assert!(rows.windows(2).all(|pair| pair[0] + 1 == pair[1]));

            assert_eq!(measure_eye_width(&hist, v_end, v_start).unwrap(), report);
            assert_eq!(measure_eye_width(&hist, v_start, v_end).unwrap(), report);
        }
    }

    #[test]
    fn widening_the_band_never_widens_the_minimum() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let (hist, _) = random_eye(&mut rng);
            let (v_start, v_end) = random_band(&mut rng, &hist);
            let (low, high) = if v_start <= v_end { (v_start, v_end) } else { (v_end, v_start) };
            let narrow = measure_eye_width(&hist, low, high).unwrap();
            let lower = low - rng.gen_range(0.0..0.5);
            let higher = high + rng.gen_range(0.0..0.5);
            let wide = measure_eye_width(&hist, lower, higher).unwrap();
            assert!(wide.min_width_fs <= narrow.min_width_fs);
            assert!(wide.widthslice.len() >= narrow.widthslice.len());
        }
    }
}
