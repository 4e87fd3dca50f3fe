//! Dashboard composition: startup and teardown of the polling cycles.

use std::sync::Arc;
use std::time::Duration;

use agridash_domain::connection::ConnectionState;
use agridash_domain::history::HistoryLimit;

use crate::ports::{ChartRenderer, DashboardApi, DashboardView, Notifier};
use crate::scheduler::PeriodicTask;
use crate::services::history_service::HistoryService;
use crate::services::live_service::LiveService;
use crate::services::stats_service::StatsService;

/// Timing of the dashboard's periodic work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Period of the current-readings poll.
    pub live_interval: Duration,
    /// Period of the history auto-refresh.
    pub history_interval: Duration,
    /// Window used while the range selector holds no valid value.
    pub default_limit: HistoryLimit,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            live_interval: Duration::from_secs(2),
            history_interval: Duration::from_secs(300),
            default_limit: HistoryLimit::DEFAULT,
        }
    }
}

/// The running dashboard: three services and two periodic tasks.
pub struct Dashboard<A, V, N, R: ChartRenderer> {
    live: Arc<LiveService<A, V, N>>,
    history: Arc<HistoryService<A, V, R>>,
    stats: StatsService<A, V>,
    live_task: PeriodicTask,
    history_task: PeriodicTask,
}

impl<A, V, N, R> Dashboard<A, V, N, R>
where
    A: DashboardApi + Clone + 'static,
    V: DashboardView + Clone + 'static,
    N: Notifier + 'static,
    R: ChartRenderer + 'static,
{
    /// Wire the services. Nothing runs until [`start`](Self::start).
    pub fn new(api: A, view: V, notifier: N, renderer: R, config: DashboardConfig) -> Self {
        Self {
            live: Arc::new(LiveService::new(api.clone(), view.clone(), notifier)),
            history: Arc::new(HistoryService::new(
                api.clone(),
                view.clone(),
                renderer,
                config.default_limit,
            )),
            stats: StatsService::new(api, view),
            live_task: PeriodicTask::new("live", config.live_interval),
            history_task: PeriodicTask::new("history", config.history_interval),
        }
    }

    /// Startup sequence: badge to disconnected, start live polling, load
    /// the statistics, then start the history refresh (whose first run is
    /// the initial history load).
    pub async fn start(&mut self) {
        tracing::info!(
            live_ms = self.live_task.period().as_millis(),
            history_secs = self.history_task.period().as_secs(),
            "starting dashboard"
        );
        self.live.show_connection(ConnectionState::Disconnected);

        let live = Arc::clone(&self.live);
        self.live_task.start(move || {
            let live = Arc::clone(&live);
            async move {
                live.update_data().await;
            }
        });

        self.stats.load_statistics().await;

        let history = Arc::clone(&self.history);
        self.history_task.start(move || {
            let history = Arc::clone(&history);
            async move {
                history.load_history().await;
            }
        });
    }

    /// Stop both periodic tasks, letting runs in progress finish.
    pub async fn shutdown(&mut self) {
        self.live_task.stop().await;
        self.history_task.stop().await;
        tracing::info!("dashboard stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.live_task.is_running() || self.history_task.is_running()
    }

    #[must_use]
    pub fn live(&self) -> Arc<LiveService<A, V, N>> {
        Arc::clone(&self.live)
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService<A, V, R>> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn stats(&self) -> &StatsService<A, V> {
        &self.stats
    }
}
