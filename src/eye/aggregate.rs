use crate::eye::scanner::{scan_row, RowEdges};
use crate::eye::{Band, EyeGeometry, EyeHistogram};

/// Edges found in one histogram row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowWidth {
    pub row: usize,
    pub edges: RowEdges,
}

/// Outermost edges seen anywhere in the band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandEnvelope {
    pub far_left: usize,
    pub far_right: usize,
}

impl BandEnvelope {
    pub fn span(&self) -> usize {
        self.far_right - self.far_left
    }
}

/// Result of scanning every row of a band.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BandScan {
    pub rows: Vec<RowWidth>,
    pub envelope: Option<BandEnvelope>,
    /// Smallest per-row opening in columns.
    pub narrowest: Option<usize>,
}

/// Collects per-row edges in iteration order.
#[derive(Debug, Default)]
pub struct WidthAggregator {
    rows: Vec<RowWidth>,
    envelope: Option<BandEnvelope>,
    narrowest: Option<usize>,
}

impl WidthAggregator {
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            rows: Vec::with_capacity(rows),
            envelope: None,
            narrowest: None,
        }
    }

    pub fn add_row(&mut self, row: usize, edges: RowEdges) {
        debug_assert!(self.rows.last().map_or(true, |last| last.row < row));
        self.envelope = Some(match self.envelope {
            Some(envelope) => BandEnvelope {
                far_left: envelope.far_left.min(edges.left),
                far_right: envelope.far_right.max(edges.right),
            },
            None => BandEnvelope {
                far_left: edges.left,
                far_right: edges.right,
            },
        });
        let span = edges.span();
        self.narrowest = Some(self.narrowest.map_or(span, |narrowest| narrowest.min(span)));
        self.rows.push(RowWidth { row, edges });
    }

    pub fn finish(self) -> BandScan {
        let Self {
            rows,
            envelope,
            narrowest,
        } = self;
        BandScan {
            rows,
            envelope,
            narrowest,
        }
    }
}

/// Scans each row of `band`, bottom to top.
pub fn scan_band(histogram: &EyeHistogram, geometry: &EyeGeometry, band: Band) -> BandScan {
    let mut aggregator = WidthAggregator::with_capacity(band.len());
    for row in band.rows() {
        let edges = scan_row(histogram.row(row), geometry.x_center);
        aggregator.add_row(row, edges);
    }
    aggregator.finish()
}
