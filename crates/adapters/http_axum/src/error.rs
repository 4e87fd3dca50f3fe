//! HTTP error response mapping for the page server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use agridash_domain::history::InvalidHistoryLimit;
use agridash_domain::pump::UnknownPumpAction;
use agridash_domain::view::{CanvasId, UnknownCanvas};

/// Errors raised by page handlers.
#[derive(Debug, thiserror::Error)]
pub enum DashboardPageError {
    #[error("failed to render page")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    UnknownCanvas(#[from] UnknownCanvas),

    #[error(transparent)]
    UnknownPumpAction(#[from] UnknownPumpAction),

    #[error(transparent)]
    InvalidLimit(#[from] InvalidHistoryLimit),

    #[error("invalid pump duration `{0}`")]
    InvalidDuration(String),

    #[error("no chart drawn on `{0}` yet")]
    ChartNotReady(CanvasId),
}

impl IntoResponse for DashboardPageError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Template(err) => {
                tracing::error!(error = %err, "template error");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
                    .into_response();
            }
            Self::UnknownCanvas(_) | Self::UnknownPumpAction(_) | Self::ChartNotReady(_) => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidLimit(_) | Self::InvalidDuration(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}
