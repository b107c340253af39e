// src/filter/mod.rs
pub mod base;
pub mod eye_width;
pub mod host;
pub mod params;
pub mod registry;
pub mod stream;

pub use base::{Category, Filter};
pub use eye_width::EyeWidthMeasurement;
pub use host::HostAccess;
pub use params::{EyeWidthConfig, FilterParameter, ParameterMap, END_VOLTAGE, START_VOLTAGE};
pub use registry::{create_filter, protocol_names, FilterFactory};
pub use stream::{OutputStream, StreamDescriptor, StreamInfo, StreamType, Unit, Waveform};
