//! Per-canvas chart ownership.
//!
//! At most one chart is bound to a canvas. Installing a chart on a canvas
//! that already holds one destroys the old chart first.

use std::collections::HashMap;

use agridash_domain::view::CanvasId;

use crate::ports::ChartHandle;

/// Owner of every live chart, keyed by canvas.
pub struct ChartRegistry<C: ChartHandle> {
    charts: HashMap<CanvasId, C>,
}

impl<C: ChartHandle> Default for ChartRegistry<C> {
    fn default() -> Self {
        Self {
            charts: HashMap::new(),
        }
    }
}

impl<C: ChartHandle> ChartRegistry<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `chart` to `canvas`, destroying the chart it replaces.
    pub fn replace(&mut self, canvas: CanvasId, chart: C) {
        if let Some(previous) = self.charts.remove(&canvas) {
            tracing::debug!(%canvas, "destroying previous chart");
            previous.destroy();
        }
        self.charts.insert(canvas, chart);
    }

    #[must_use]
    pub fn get(&self, canvas: CanvasId) -> Option<&C> {
        self.charts.get(&canvas)
    }

    /// Unbind the chart on `canvas` without destroying it.
    pub fn remove(&mut self, canvas: CanvasId) -> Option<C> {
        self.charts.remove(&canvas)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Destroy every bound chart.
    pub fn clear(&mut self) {
        for (_, chart) in self.charts.drain() {
            chart.destroy();
        }
    }
}

impl<C: ChartHandle> Drop for ChartRegistry<C> {
    fn drop(&mut self) {
        self.clear();
    }
}
