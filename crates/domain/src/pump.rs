//! Pump status and pump commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::view::Rgb;

/// Status text colour while the pump runs.
pub const PUMP_ON_COLOR: Rgb = Rgb(0x10, 0xb9, 0x81);
/// Status text colour while the pump is idle.
pub const PUMP_OFF_COLOR: Rgb = Rgb(0x6b, 0x72, 0x80);
/// Class toggled on the pump indicator while the pump runs.
pub const INDICATOR_ON_CLASS: &str = "on";

/// Payload of `GET /api/pump/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpStatus {
    pub is_on: bool,
    /// GPIO pin driving the relay, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<u8>,
}

impl PumpStatus {
    /// `ON` / `OFF` status label.
    #[must_use]
    pub fn label(self) -> &'static str {
        if self.is_on { "ON" } else { "OFF" }
    }

    /// Colour of the status label.
    #[must_use]
    pub fn color(self) -> Rgb {
        if self.is_on {
            PUMP_ON_COLOR
        } else {
            PUMP_OFF_COLOR
        }
    }
}

/// Requested pump transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PumpAction {
    On,
    Off,
}

impl PumpAction {
    /// Backend path for this action.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::On => "/api/pump/on",
            Self::Off => "/api/pump/off",
        }
    }
}

impl fmt::Display for PumpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Returned when a string does not name a pump action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pump action `{0}`")]
pub struct UnknownPumpAction(pub String);

impl FromStr for PumpAction {
    type Err = UnknownPumpAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(UnknownPumpAction(other.to_string())),
        }
    }
}

/// A pump command ready to be sent to the backend.
///
/// Only [`PumpAction::On`] carries an auto-off duration, and a zero duration
/// means "no auto-off".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpCommand {
    action: PumpAction,
    duration_secs: Option<u32>,
}

impl PumpCommand {
    /// Build a command, normalising the duration.
    #[must_use]
    pub fn new(action: PumpAction, duration_secs: Option<u32>) -> Self {
        let duration_secs = match action {
            PumpAction::On => duration_secs.filter(|secs| *secs > 0),
            PumpAction::Off => None,
        };
        Self {
            action,
            duration_secs,
        }
    }

    #[must_use]
    pub fn action(&self) -> PumpAction {
        self.action
    }

    #[must_use]
    pub fn duration_secs(&self) -> Option<u32> {
        self.duration_secs
    }

    /// JSON request body.
    #[must_use]
    pub fn body(&self) -> PumpCommandBody {
        PumpCommandBody {
            duration: self.duration_secs,
        }
    }
}

/// JSON body of `POST /api/pump/on` and `POST /api/pump/off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpCommandBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// Backend acknowledgement of a pump command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}
