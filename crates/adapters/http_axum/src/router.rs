//! Axum router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use agridash_app::ports::{ChartRenderer, DashboardApi};

use crate::dashboard;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<A, R>(state: AppState<A, R>) -> Router
where
    A: DashboardApi + 'static,
    R: ChartRenderer + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(dashboard::index::<A, R>))
        .route("/charts/{canvas}", get(dashboard::chart::<A, R>))
        .route("/pump/{action}", post(dashboard::pump::<A, R>))
        .route("/range", post(dashboard::range::<A, R>))
        .route(
            "/toasts/{id}/dismiss",
            post(dashboard::dismiss_toast::<A, R>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
