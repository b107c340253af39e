use thiserror::Error;

use crate::filter::StreamType;

/// Reasons a measurement cannot run. All of them count as invalid input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EyeWidthError {
    #[error("no eye histogram on the input port")]
    MissingInput,
    #[error("input stream is {actual:?}, expected an eye pattern")]
    WrongStreamType { actual: StreamType },
    #[error("histogram {field} must be greater than zero, got {value}")]
    InvalidGeometry { field: &'static str, value: f64 },
    #[error("histogram data has {actual} cells, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}
