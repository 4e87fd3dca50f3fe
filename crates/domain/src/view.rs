//! Display element identifiers and colours shared by every view adapter.
//!
//! The identifiers are the element IDs of the dashboard markup. Adapters render
//! them verbatim so that stylesheets and external tooling keep working.

use std::fmt;
use std::str::FromStr;

/// A text or state-bearing element of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    /// History range selector (record limit).
    DataRange,
    TempValue,
    HumValue,
    SoilValue,
    LightValue,
    /// Pump indicator lamp, carries the `on` class while the pump runs.
    PumpIndicator,
    PumpStatusText,
    /// Container of the statistics block.
    StatsContent,
    /// Connection badge.
    ConnectionStatus,
}

impl ElementId {
    /// Every element, in markup order.
    pub const ALL: [Self; 9] = [
        Self::DataRange,
        Self::TempValue,
        Self::HumValue,
        Self::SoilValue,
        Self::LightValue,
        Self::PumpIndicator,
        Self::PumpStatusText,
        Self::StatsContent,
        Self::ConnectionStatus,
    ];

    /// The markup ID of this element.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataRange => "data-range",
            Self::TempValue => "temp-value",
            Self::HumValue => "hum-value",
            Self::SoilValue => "soil-value",
            Self::LightValue => "light-value",
            Self::PumpIndicator => "pump-indicator",
            Self::PumpStatusText => "pump-status-text",
            Self::StatsContent => "stats-content",
            Self::ConnectionStatus => "connection-status",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart slot. Each slot hosts at most one live chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanvasId {
    /// Temperature and humidity chart.
    Temperature,
    /// Soil moisture and light level chart.
    SoilLight,
}

impl CanvasId {
    pub const ALL: [Self; 2] = [Self::Temperature, Self::SoilLight];

    /// The markup ID of this canvas.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "tempChart",
            Self::SoilLight => "soilChart",
        }
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a canvas identifier does not name a chart slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown canvas `{0}`")]
pub struct UnknownCanvas(pub String);

impl FromStr for CanvasId {
    type Err = UnknownCanvas;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|canvas| canvas.as_str() == s)
            .ok_or_else(|| UnknownCanvas(s.to_string()))
    }
}

/// An opaque 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Same colour with an alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A colour with opacity in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb(r, g, b) = self.rgb;
        write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)
    }
}
