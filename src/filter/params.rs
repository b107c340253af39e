use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::Unit;

pub const START_VOLTAGE: &str = "Start Voltage";
pub const END_VOLTAGE: &str = "End Voltage";

/// A single user-facing float setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterParameter {
    pub unit: Unit,
    pub value: f64,
}

impl FilterParameter {
    pub fn float(unit: Unit, value: f32) -> Self {
        Self {
            unit,
            value: f64::from(value),
        }
    }

    pub fn float_value(&self) -> f32 {
        self.value as f32
    }

    pub fn set_float_value(&mut self, value: f32) {
        self.value = f64::from(value);
    }
}

/// Parameters keyed by display name.
pub type ParameterMap = BTreeMap<String, FilterParameter>;

/// Voltage band to measure. The ends may be given in either order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeWidthConfig {
    pub start_voltage: f32,
    pub end_voltage: f32,
}

impl EyeWidthConfig {
    pub const DEFAULT: Self = Self {
        start_voltage: 0.0,
        end_voltage: 0.0,
    };

    pub fn from_parameters(parameters: &ParameterMap) -> Self {
        let read = |name: &str, fallback: f32| {
            parameters
                .get(name)
                .map_or(fallback, FilterParameter::float_value)
        };
        Self {
            start_voltage: read(START_VOLTAGE, Self::DEFAULT.start_voltage),
            end_voltage: read(END_VOLTAGE, Self::DEFAULT.end_voltage),
        }
    }

    pub fn to_parameters(self) -> ParameterMap {
        let mut parameters = ParameterMap::new();
        parameters.insert(
            START_VOLTAGE.to_owned(),
            FilterParameter::float(Unit::Volts, self.start_voltage),
        );
        parameters.insert(
            END_VOLTAGE.to_owned(),
            FilterParameter::float(Unit::Volts, self.end_voltage),
        );
        parameters
    }
}

impl Default for EyeWidthConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
