//! Process-wide catalog of filters, keyed by protocol name.
use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::filter::{EyeWidthMeasurement, Filter};

pub type FilterFactory = fn() -> Box<dyn Filter>;

static CATALOG: Lazy<BTreeMap<&'static str, FilterFactory>> = Lazy::new(|| {
    let mut catalog: BTreeMap<&'static str, FilterFactory> = BTreeMap::new();
    catalog.insert(EyeWidthMeasurement::PROTOCOL_NAME, eye_width);
    catalog
});

fn eye_width() -> Box<dyn Filter> {
    Box::new(EyeWidthMeasurement::default())
}

/// Instantiates the filter registered under `protocol_name`.
pub fn create_filter(protocol_name: &str) -> Option<Box<dyn Filter>> {
    CATALOG.get(protocol_name).map(|factory| factory())
}

pub fn protocol_names() -> impl Iterator<Item = &'static str> {
    CATALOG.keys().copied()
}
