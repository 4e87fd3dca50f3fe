//! Common error types used across the workspace.
//!
//! Every backend failure is one of four kinds: the request never completed,
//! the backend answered with a non-success status, the body was not the
//! expected JSON, or a required field was null or absent. Callers collapse
//! all four to the same handling, but the variants stay distinct for logs.

/// Boxed error used for transport failures raised by adapter crates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while talking to the monitoring backend.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Network or transport failure (connection refused, reset, timeout).
    #[error("backend request failed")]
    Transport(#[source] BoxError),

    /// The backend answered with a non-2xx status.
    #[error("backend responded with HTTP {status}")]
    Status {
        status: u16,
        /// Error detail extracted from the body, when present.
        message: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("failed to decode backend response")]
    Decode(#[from] serde_json::Error),

    /// A field required by the caller was null or missing.
    #[error("missing field `{0}` in backend response")]
    MissingField(&'static str),
}

impl DashboardError {
    /// Wrap any transport-level error.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }
}

/// Errors raised while drawing a chart.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// The chart has no data points to draw.
    #[error("chart `{0}` has no data points")]
    Empty(&'static str),

    /// The drawing backend failed.
    #[error("failed to draw chart")]
    Draw(#[source] BoxError),
}
