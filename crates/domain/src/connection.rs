//! Connection health as shown by the connection badge.
//!
//! Two states, no retrying state: every polling attempt moves the machine to
//! [`ConnectionState::Connected`] on success or
//! [`ConnectionState::Disconnected`] on failure.

use std::fmt;

/// Outcome of the most recent current-data fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionState {
    /// State after a polling attempt.
    #[must_use]
    pub fn after_attempt(succeeded: bool) -> Self {
        if succeeded {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    /// Badge text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }

    /// Badge class. The two classes are mutually exclusive.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    /// The class that must be removed when this state is shown.
    #[must_use]
    pub fn opposite_class(self) -> &'static str {
        match self {
            Self::Connected => Self::Disconnected.css_class(),
            Self::Disconnected => Self::Connected.css_class(),
        }
    }

    #[must_use]
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
