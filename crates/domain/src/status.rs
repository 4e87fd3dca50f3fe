//! Complete system status exposed by the backend.

use serde::{Deserialize, Serialize};

use crate::pump::PumpStatus;
use crate::readings::CurrentReadings;

/// Payload of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub sensors: CurrentReadings,
    pub pump: PumpStatus,
    pub auto_water_enabled: bool,
    /// Backend thresholds and tunables, passed through untouched.
    #[serde(default)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

impl SystemStatus {
    /// Look up a numeric backend setting.
    #[must_use]
    pub fn setting_f64(&self, key: &str) -> Option<f64> {
        self.settings.get(key).and_then(serde_json::Value::as_f64)
    }
}
