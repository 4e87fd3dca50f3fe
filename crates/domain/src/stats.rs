//! Summary statistics block.

use serde::{Deserialize, Serialize};

/// Aggregates computed by the backend over the whole log.
///
/// Every field may be absent or null; absent values render as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSummary {
    pub total_records: Option<u64>,
    pub avg_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub avg_soil_moisture: Option<f64>,
}

/// One labelled value of the statistics block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatItem {
    pub label: &'static str,
    pub value: String,
}

impl StatItem {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

fn celsius(value: Option<f64>) -> String {
    format!("{:.1}\u{b0}C", value.unwrap_or_default())
}

impl StatsSummary {
    /// The statistics block, in display order.
    #[must_use]
    pub fn items(&self) -> Vec<StatItem> {
        vec![
            StatItem::new(
                "Total Records",
                self.total_records.unwrap_or_default().to_string(),
            ),
            StatItem::new("Avg Temperature", celsius(self.avg_temperature)),
            StatItem::new(
                "Avg Soil Moisture",
                format!("{:.0}", self.avg_soil_moisture.unwrap_or_default().round()),
            ),
            StatItem::new("Min Temp", celsius(self.min_temperature)),
            StatItem::new("Max Temp", celsius(self.max_temperature)),
        ]
    }
}

/// Payload of `GET /api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<StatsSummary>,
}

impl StatsEnvelope {
    /// The summary, if the backend reported success and sent data.
    #[must_use]
    pub fn into_summary(self) -> Option<StatsSummary> {
        if self.success { self.data } else { None }
    }
}
