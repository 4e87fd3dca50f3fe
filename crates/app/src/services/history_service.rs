//! History service: the history window and its two charts.

use std::sync::{Mutex, PoisonError};

use agridash_domain::chart::{ChartSpec, soil_chart, temperature_chart};
use agridash_domain::history::{HistoryLimit, HistorySeries};
use agridash_domain::view::{CanvasId, ElementId};

use crate::chart_registry::ChartRegistry;
use crate::ports::{ChartRenderer, DashboardApi, DashboardView};

/// What a [`HistoryService::load_history`] run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// History was transformed; `charts` of the two charts were redrawn.
    Rendered { points: usize, charts: usize },
    /// The backend had no rows. Charts were left alone.
    Empty,
    /// The request failed. Charts were left alone.
    Failed,
}

/// Application service behind the history charts.
pub struct HistoryService<A, V, R: ChartRenderer> {
    api: A,
    view: V,
    renderer: R,
    charts: Mutex<ChartRegistry<R::Chart>>,
    default_limit: HistoryLimit,
}

impl<A, V, R> HistoryService<A, V, R>
where
    A: DashboardApi,
    V: DashboardView,
    R: ChartRenderer,
{
    /// Create a new service; `default_limit` applies while the range
    /// selector is empty or holds garbage.
    pub fn new(api: A, view: V, renderer: R, default_limit: HistoryLimit) -> Self {
        Self {
            api,
            view,
            renderer,
            charts: Mutex::new(ChartRegistry::new()),
            default_limit,
        }
    }

    /// Limit currently selected on the range selector.
    pub fn selected_limit(&self) -> HistoryLimit {
        self.view
            .value(ElementId::DataRange)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(self.default_limit)
    }

    /// Fetch the selected window and redraw both charts.
    pub async fn load_history(&self) -> HistoryOutcome {
        let limit = self.selected_limit();
        let records = match self.api.history(limit).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(%limit, error = %err, "failed to load history");
                return HistoryOutcome::Failed;
            }
        };

        if records.is_empty() {
            tracing::info!(%limit, "no history data available");
            return HistoryOutcome::Empty;
        }

        let series = HistorySeries::from_records(&records);
        if series.substitutions > 0 {
            tracing::warn!(
                records = series.len(),
                substitutions = series.substitutions,
                "history values unparseable, plotted as 0"
            );
        }

        let mut charts = 0;
        if self.render_temperature_chart(
            series.labels.clone(),
            series.temperature,
            series.humidity,
        ) {
            charts += 1;
        }
        if self.render_soil_chart(series.labels, series.soil_moisture, series.light_level) {
            charts += 1;
        }

        tracing::debug!(%limit, records = records.len(), charts, "history rendered");
        HistoryOutcome::Rendered {
            points: records.len(),
            charts,
        }
    }

    /// Draw the temperature/humidity chart and bind it to its canvas.
    /// Returns `false` when drawing failed; the previous chart then stays.
    pub fn render_temperature_chart(
        &self,
        labels: Vec<String>,
        temperature: Vec<f64>,
        humidity: Vec<f64>,
    ) -> bool {
        self.install(&temperature_chart(labels, temperature, humidity))
    }

    /// Draw the soil/light chart and bind it to its canvas.
    /// Returns `false` when drawing failed; the previous chart then stays.
    pub fn render_soil_chart(
        &self,
        labels: Vec<String>,
        soil_moisture: Vec<f64>,
        light_level: Vec<f64>,
    ) -> bool {
        self.install(&soil_chart(labels, soil_moisture, light_level))
    }

    /// Store `limit` on the range selector and reload.
    pub async fn change_range(&self, limit: HistoryLimit) -> HistoryOutcome {
        self.view.set_value(ElementId::DataRange, &limit.to_string());
        self.load_history().await
    }

    /// Run `f` against the chart bound to `canvas`.
    pub fn with_chart<T>(&self, canvas: CanvasId, f: impl FnOnce(&R::Chart) -> T) -> Option<T> {
        let charts = self.charts.lock().unwrap_or_else(PoisonError::into_inner);
        charts.get(canvas).map(f)
    }

    /// Number of canvases with a chart bound.
    pub fn active_charts(&self) -> usize {
        self.charts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn install(&self, spec: &ChartSpec) -> bool {
        match self.renderer.render(spec) {
            Ok(chart) => {
                self.charts
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .replace(spec.canvas, chart);
                true
            }
            Err(err) => {
                tracing::warn!(canvas = %spec.canvas, error = %err, "failed to render chart");
                false
            }
        }
    }
}
