//! Current sensor readings and their display formatting.

use serde::{Deserialize, Serialize};

use crate::view::ElementId;

/// Text shown for a reading the backend did not provide.
pub const PLACEHOLDER: &str = "--";

/// A single live value as sent by the backend.
///
/// The backend normally sends numbers, but a sensor driver may forward a raw
/// string (e.g. `"ERR"`); such values are shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Number(f64),
    Text(String),
}

impl SensorValue {
    /// Display text: numbers with exactly one decimal place, text verbatim.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Number(value) => format!("{value:.1}"),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Format an optional reading, falling back to [`PLACEHOLDER`].
#[must_use]
pub fn format_reading(value: Option<&SensorValue>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), SensorValue::display)
}

/// Payload of `GET /api/data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentReadings {
    /// Temperature in °C.
    pub temp: Option<SensorValue>,
    /// Relative humidity in %.
    pub hum: Option<SensorValue>,
    /// Soil moisture, raw ADC scale (0–1023).
    pub soil: Option<SensorValue>,
    /// Light level, raw ADC scale (0–1023).
    pub light: Option<SensorValue>,
    /// When the backend sampled the sensors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CurrentReadings {
    /// Display text for each live-value element, in markup order.
    #[must_use]
    pub fn display_values(&self) -> [(ElementId, String); 4] {
        [
            (ElementId::TempValue, format_reading(self.temp.as_ref())),
            (ElementId::HumValue, format_reading(self.hum.as_ref())),
            (ElementId::SoilValue, format_reading(self.soil.as_ref())),
            (ElementId::LightValue, format_reading(self.light.as_ref())),
        ]
    }
}
