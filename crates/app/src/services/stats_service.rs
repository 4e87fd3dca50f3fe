//! Statistics service: the summary block, loaded once at startup.

use agridash_domain::view::ElementId;

use crate::ports::{DashboardApi, DashboardView};

/// Application service behind the statistics block.
pub struct StatsService<A, V> {
    api: A,
    view: V,
}

impl<A: DashboardApi, V: DashboardView> StatsService<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self { api, view }
    }

    /// Fetch the summary and write it into the statistics block.
    ///
    /// Returns `false` when nothing was written; the reason is logged.
    pub async fn load_statistics(&self) -> bool {
        match self.api.stats().await {
            Ok(envelope) => {
                let message = envelope.message.clone();
                if let Some(summary) = envelope.into_summary() {
                    self.view.set_stats(&summary.items());
                    true
                } else {
                    tracing::warn!(
                        element = %ElementId::StatsContent,
                        reason = ?message,
                        "backend reported no statistics"
                    );
                    false
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load statistics");
                false
            }
        }
    }
}
