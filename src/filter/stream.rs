use std::fmt;

use serde::{Deserialize, Serialize};

use crate::eye::{EyeHistogram, EyeWidthError, SparseWaveform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "V")]
    Volts,
    #[serde(rename = "mV")]
    Millivolts,
    #[serde(rename = "fs")]
    Femtoseconds,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Volts => "V",
            Unit::Millivolts => "mV",
            Unit::Femtoseconds => "fs",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Declared type of a stream flowing between filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamType {
    Analog,
    AnalogScalar,
    Eye,
}

/// Static description of one output stream.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StreamInfo {
    pub name: &'static str,
    pub unit: Unit,
    pub stream_type: StreamType,
}

/// Waveform payloads this crate knows how to carry.
#[derive(Clone, Debug, PartialEq)]
pub enum Waveform {
    Eye(EyeHistogram),
    SparseAnalog(SparseWaveform),
}

impl Waveform {
    pub fn stream_type(&self) -> StreamType {
        match self {
            Waveform::Eye(_) => StreamType::Eye,
            Waveform::SparseAnalog(_) => StreamType::Analog,
        }
    }
}

/// Borrowed view of a stream attached to a filter input.
#[derive(Clone, Copy, Debug)]
pub struct StreamDescriptor<'a> {
    pub stream_type: StreamType,
    pub data: Option<&'a Waveform>,
}

impl<'a> StreamDescriptor<'a> {
    pub fn of(waveform: &'a Waveform) -> Self {
        Self {
            stream_type: waveform.stream_type(),
            data: Some(waveform),
        }
    }

    /// Declared type without any data behind it yet.
    pub fn pending(stream_type: StreamType) -> Self {
        Self {
            stream_type,
            data: None,
        }
    }

    pub fn eye(&self) -> Result<&'a EyeHistogram, EyeWidthError> {
        if self.stream_type != StreamType::Eye {
            return Err(EyeWidthError::WrongStreamType {
                actual: self.stream_type,
            });
        }
        match self.data {
            Some(Waveform::Eye(histogram)) => Ok(histogram),
            Some(other) => Err(EyeWidthError::WrongStreamType {
                actual: other.stream_type(),
            }),
            None => Err(EyeWidthError::MissingInput),
        }
    }
}

/// Output stream slot owned by a filter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutputStream {
    #[serde(flatten)]
    pub info: StreamInfo,
    pub waveform: Option<SparseWaveform>,
    /// Scalar value, NaN until measured.
    pub value: f64,
}

impl OutputStream {
    pub fn new(name: &'static str, unit: Unit, stream_type: StreamType) -> Self {
        Self {
            info: StreamInfo {
                name,
                unit,
                stream_type,
            },
            waveform: None,
            value: f64::NAN,
        }
    }
}
