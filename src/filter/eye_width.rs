// src/filter/eye_width.rs
use log::{log, Level};

use crate::eye::{measure_eye_width, EyeWidthError, EyeWidthReport, SparseWaveform};
use crate::filter::{
    Category, EyeWidthConfig, Filter, HostAccess, OutputStream, ParameterMap, StreamDescriptor,
    StreamType, Unit,
};

const WIDTHSLICE: usize = 0;
const MINWIDTH: usize = 1;

// An unconnected port is normal while a graph is being built and refreshes
// continuously, so only real input problems are warnings.
fn refresh_log_level(err: &EyeWidthError) -> Level {
    match err {
        EyeWidthError::MissingInput => Level::Debug,
        _ => Level::Warn,
    }
}

/// Horizontal eye opening across a voltage band of an eye pattern.
///
/// Output 0 (`widthslice`) holds one width per voltage row, output 1 (`minwidth`)
/// the narrowest of them.
#[derive(Debug)]
pub struct EyeWidthMeasurement {
    parameters: ParameterMap,
    outputs: Vec<OutputStream>,
}

impl Default for EyeWidthMeasurement {
    fn default() -> Self {
        Self::new(EyeWidthConfig::DEFAULT)
    }
}

impl EyeWidthMeasurement {
    pub const PROTOCOL_NAME: &'static str = "Eye Width";
    const INPUTS: [&'static str; 1] = ["Eye"];

    pub fn new(config: EyeWidthConfig) -> Self {
        Self {
            parameters: config.to_parameters(),
            outputs: vec![
                OutputStream::new("widthslice", Unit::Femtoseconds, StreamType::Analog),
                OutputStream::new("minwidth", Unit::Femtoseconds, StreamType::AnalogScalar),
            ],
        }
    }

    pub fn config(&self) -> EyeWidthConfig {
        EyeWidthConfig::from_parameters(&self.parameters)
    }

    pub fn set_config(&mut self, config: EyeWidthConfig) {
        self.parameters = config.to_parameters();
    }

    pub fn widthslice(&self) -> Option<&SparseWaveform> {
        self.outputs[WIDTHSLICE].waveform.as_ref()
    }

    pub fn min_width_fs(&self) -> f64 {
        self.outputs[MINWIDTH].value
    }

    fn measure(
        &self,
        inputs: &[Option<StreamDescriptor<'_>>],
    ) -> Result<EyeWidthReport, EyeWidthError> {
        let stream = inputs
            .first()
            .copied()
            .flatten()
            .ok_or(EyeWidthError::MissingInput)?;
        if !self.validate_channel(0, Some(&stream)) {
            return Err(EyeWidthError::WrongStreamType {
                actual: stream.stream_type,
            });
        }
        let histogram = stream.eye()?;
        histogram.prepare_for_host_access();
        let config = self.config();
        measure_eye_width(histogram, config.start_voltage, config.end_voltage)
    }
}

impl Filter for EyeWidthMeasurement {
    fn protocol_name(&self) -> &'static str {
        Self::PROTOCOL_NAME
    }

    fn category(&self) -> Category {
        Category::Measurement
    }

    fn input_names(&self) -> &[&'static str] {
        &Self::INPUTS
    }

    fn validate_channel(&self, index: usize, stream: Option<&StreamDescriptor<'_>>) -> bool {
        match stream {
            Some(stream) => index == 0 && stream.stream_type == StreamType::Eye,
            None => false,
        }
    }

    fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut ParameterMap {
        &mut self.parameters
    }

    fn streams(&self) -> &[OutputStream] {
        &self.outputs
    }

    fn refresh(&mut self, inputs: &[Option<StreamDescriptor<'_>>]) {
        let previous = self.outputs[WIDTHSLICE].waveform.take();
        if let Some(previous) = &previous {
            previous.prepare_for_host_access();
        }
        match self.measure(inputs) {
            Ok(report) => {
                let EyeWidthReport {
                    mut widthslice,
                    min_width_fs,
                    envelope_width_fs: _,
                } = report;
                widthslice.revision = previous.map_or(0, |previous| previous.revision);
                widthslice.mark_modified_on_host();
                self.outputs[WIDTHSLICE].waveform = Some(widthslice);
                self.outputs[MINWIDTH].value = min_width_fs;
            }
            Err(err) => {
                log!(refresh_log_level(&err), "{}: {err}", Self::PROTOCOL_NAME);
                self.outputs[WIDTHSLICE].waveform = None;
                self.outputs[MINWIDTH].value = f64::NAN;
            }
        }
    }
}
