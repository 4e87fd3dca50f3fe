//! Historical readings and their transformation into chart series.
//!
//! The backend stores its log as CSV and serialises every column as a string,
//! so numeric fields are decoded leniently. The parsing contract:
//!
//! - floats take the longest leading decimal literal (`"23.5abc"` → `23.5`)
//! - integers take the longest leading run of digits (`"455.7"` → `455`)
//! - JSON numbers are used as-is (integers truncate toward zero)
//! - anything else (null, missing, empty, `"nan"`, booleans) becomes `0`
//!
//! Substituted zeros are counted so callers can report them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::time::short_label;

/// A history row exactly as received from `GET /api/history`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    pub timestamp: Option<String>,
    pub temp: Value,
    pub humidity: Value,
    pub soil_moisture: Value,
    pub light_level: Value,
    /// `"ON"` / `"OFF"` as logged at sampling time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pump_status: Option<String>,
}

/// A history row after numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub timestamp: String,
    pub temp: f64,
    pub humidity: f64,
    pub soil_moisture: i64,
    pub light_level: i64,
}

/// Longest leading decimal literal of `raw`, after leading whitespace.
fn float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest leading signed integer of `raw`, after leading whitespace.
fn int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Lenient float decoding; `None` means the value was substituted.
#[must_use]
pub fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => float_prefix(s),
        _ => None,
    }
}

/// Lenient integer decoding; `None` means the value was substituted.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        Value::String(s) => int_prefix(s),
        _ => None,
    }
}

impl HistoryRecord {
    /// Coerce into a [`SensorReading`], returning how many fields fell back to zero.
    #[must_use]
    pub fn coerce(&self) -> (SensorReading, usize) {
        let mut substituted = 0;
        let mut float = |value: &Value| {
            coerce_float(value).unwrap_or_else(|| {
                substituted += 1;
                0.0
            })
        };
        let temp = float(&self.temp);
        let humidity = float(&self.humidity);
        let mut int = |value: &Value| {
            coerce_int(value).unwrap_or_else(|| {
                substituted += 1;
                0
            })
        };
        let soil_moisture = int(&self.soil_moisture);
        let light_level = int(&self.light_level);

        let reading = SensorReading {
            timestamp: self.timestamp.clone().unwrap_or_default(),
            temp,
            humidity,
            soil_moisture,
            light_level,
        };
        (reading, substituted)
    }
}

/// Parallel chart-ready arrays built from a history window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySeries {
    pub labels: Vec<String>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub soil_moisture: Vec<f64>,
    pub light_level: Vec<f64>,
    /// Number of numeric fields that fell back to zero.
    pub substitutions: usize,
}

impl HistorySeries {
    /// Transform raw history rows, preserving their order.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let mut series = Self {
            labels: Vec::with_capacity(records.len()),
            temperature: Vec::with_capacity(records.len()),
            humidity: Vec::with_capacity(records.len()),
            soil_moisture: Vec::with_capacity(records.len()),
            light_level: Vec::with_capacity(records.len()),
            substitutions: 0,
        };
        for record in records {
            let (reading, substituted) = record.coerce();
            series.labels.push(short_label(&reading.timestamp));
            series.temperature.push(reading.temp);
            series.humidity.push(reading.humidity);
            series.soil_moisture.push(reading.soil_moisture as f64);
            series.light_level.push(reading.light_level as f64);
            series.substitutions += substituted;
        }
        series
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Number of history rows requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HistoryLimit(u32);

impl HistoryLimit {
    /// Largest window the backend keeps.
    pub const MAX: u32 = 1000;
    pub const DEFAULT: Self = Self(100);
    /// Choices offered by the range selector.
    pub const CHOICES: [u32; 4] = [50, 100, 300, 1000];

    /// Build a limit, clamped to `1..=MAX`.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, Self::MAX))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for HistoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returned when a selector value is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid history limit `{0}`")]
pub struct InvalidHistoryLimit(pub String);

impl FromStr for HistoryLimit {
    type Err = InvalidHistoryLimit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(value) if value > 0 => Ok(Self::new(value)),
            _ => Err(InvalidHistoryLimit(s.to_string())),
        }
    }
}
