use serde::Serialize;

use crate::filter::{OutputStream, ParameterMap, StreamDescriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Measurement,
}

/// Capability contract every catalog filter exposes to the graph.
pub trait Filter: Send {
    fn protocol_name(&self) -> &'static str;

    fn category(&self) -> Category;

    fn input_names(&self) -> &[&'static str];

    /// Whether `stream` may be attached to input `index`.
    fn validate_channel(&self, index: usize, stream: Option<&StreamDescriptor<'_>>) -> bool;

    fn parameters(&self) -> &ParameterMap;

    fn parameters_mut(&mut self) -> &mut ParameterMap;

    fn streams(&self) -> &[OutputStream];

    /// Recomputes every output from `inputs`. Invalid input leaves the outputs
    /// empty rather than failing.
    fn refresh(&mut self, inputs: &[Option<StreamDescriptor<'_>>]);

    fn output(&self, index: usize) -> Option<&OutputStream> {
        self.streams().get(index)
    }
}
