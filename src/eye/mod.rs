// src/eye/mod.rs
pub mod aggregate;
pub mod band;
pub mod error;
pub mod histogram;
pub mod measurement;
pub mod output;
pub mod scanner;

pub use aggregate::{scan_band, BandEnvelope, BandScan, RowWidth, WidthAggregator};
pub use band::Band;
pub use error::EyeWidthError;
pub use histogram::{EyeGeometry, EyeHistogram, EyeHistogramFile};
pub use measurement::measure_eye_width;
pub use output::{assemble, EyeWidthReport, RowWidthSample, SparseWaveform};
pub use scanner::{scan_row, RowEdges, OCCUPANCY_FLOOR};
