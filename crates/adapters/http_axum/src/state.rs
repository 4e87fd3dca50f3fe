//! Shared application state for axum handlers.

use std::sync::Arc;

use agridash_app::ports::{ChartRenderer, DashboardApi};
use agridash_app::services::history_service::HistoryService;
use agridash_app::services::live_service::LiveService;
use agridash_app::toast::ToastBoard;

use crate::page::LivePage;

/// Live service as wired for the page server.
pub type PageLiveService<A> = LiveService<A, Arc<LivePage>, Arc<ToastBoard>>;
/// History service as wired for the page server.
pub type PageHistoryService<A, R> = HistoryService<A, Arc<LivePage>, R>;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so that neither the backend nor the
/// renderer type has to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<A, R: ChartRenderer> {
    /// Readings, pump control and connection badge.
    pub live: Arc<PageLiveService<A>>,
    /// History window and charts.
    pub history: Arc<PageHistoryService<A, R>>,
    /// Display model the services write into.
    pub page: Arc<LivePage>,
    /// Pending notifications.
    pub toasts: Arc<ToastBoard>,
    /// Page auto-reload period.
    pub refresh_seconds: u32,
}

impl<A, R: ChartRenderer> Clone for AppState<A, R> {
    fn clone(&self) -> Self {
        Self {
            live: Arc::clone(&self.live),
            history: Arc::clone(&self.history),
            page: Arc::clone(&self.page),
            toasts: Arc::clone(&self.toasts),
            refresh_seconds: self.refresh_seconds,
        }
    }
}

impl<A, R> AppState<A, R>
where
    A: DashboardApi + 'static,
    R: ChartRenderer + 'static,
{
    /// Create the state from services that are shared with the background
    /// pollers.
    pub fn new(
        live: Arc<PageLiveService<A>>,
        history: Arc<PageHistoryService<A, R>>,
        page: Arc<LivePage>,
        toasts: Arc<ToastBoard>,
        refresh_seconds: u32,
    ) -> Self {
        Self {
            live,
            history,
            page,
            toasts,
            refresh_seconds: refresh_seconds.max(1),
        }
    }
}
