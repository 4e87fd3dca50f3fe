//! # agridashd: agridash daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise structured logging
//! - Construct the backend client, chart renderer and page model (adapters)
//! - Construct the dashboard services and start the polling cycles
//! - Build the axum router, injecting the shared services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agridash_adapter_backend_reqwest::ReqwestDashboardApi;
use agridash_adapter_charts_plotters::SvgChartRenderer;
use agridash_adapter_http_axum::page::LivePage;
use agridash_adapter_http_axum::router;
use agridash_adapter_http_axum::state::AppState;
use agridash_app::dashboard::Dashboard;
use agridash_app::ports::DashboardApi;
use agridash_app::toast::ToastBoard;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind = %config.bind_addr(),
        backend = %config.backend.base_url,
        "configuration loaded"
    );

    // Backend
    let api = ReqwestDashboardApi::new(&config.backend.base_url, config.request_timeout())?;
    probe_backend(&api).await;

    // Page model and notifications
    let page = Arc::new(LivePage::new());
    let toasts = Arc::new(ToastBoard::default());

    // Services and polling
    let renderer = SvgChartRenderer::new(config.charts.width, config.charts.height);
    let mut dashboard = Dashboard::new(
        api,
        Arc::clone(&page),
        Arc::clone(&toasts),
        renderer,
        config.dashboard(),
    );
    dashboard.start().await;

    // HTTP
    let state = AppState::new(
        dashboard.live(),
        dashboard.history(),
        page,
        toasts,
        config.refresh_seconds(),
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(address = %bind_addr, "agridashd listening");
    let listener = TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    dashboard.shutdown().await;
    tracing::info!("server shut down gracefully");
    Ok(())
}

/// Log what the backend reports about itself. An unreachable backend is not
/// fatal: the live poll keeps retrying and the badge shows the outage.
async fn probe_backend(api: &ReqwestDashboardApi) {
    match api.system_status().await {
        Ok(status) => tracing::info!(
            pump_on = status.pump.is_on,
            pump_pin = ?status.pump.pin,
            auto_water = status.auto_water_enabled,
            soil_dry_threshold = ?status.setting_f64("soil_dry_threshold"),
            "backend reachable"
        ),
        Err(err) => tracing::warn!(
            base_url = %api.base_url(),
            error = %err,
            "backend not reachable at startup"
        ),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        },
        () = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        },
    }
}
