//! Chart port: drawing charts and releasing them.

use std::sync::Arc;

use agridash_domain::chart::ChartSpec;
use agridash_domain::error::ChartError;

/// A drawn chart bound (or about to be bound) to a canvas.
///
/// A handle has a single owner: the
/// [`ChartRegistry`](crate::chart_registry::ChartRegistry) once installed.
pub trait ChartHandle: Send {
    /// Serialized chart, e.g. an SVG document.
    fn markup(&self) -> &str;

    /// Release every resource held by the chart.
    fn destroy(self);
}

/// Turns chart specifications into charts.
pub trait ChartRenderer: Send + Sync {
    type Chart: ChartHandle;

    /// Draw `spec`. Does not touch any chart already bound to `spec.canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError`] when the spec cannot be drawn.
    fn render(&self, spec: &ChartSpec) -> Result<Self::Chart, ChartError>;
}

impl<T: ChartRenderer> ChartRenderer for Arc<T> {
    type Chart = T::Chart;

    fn render(&self, spec: &ChartSpec) -> Result<Self::Chart, ChartError> {
        (**self).render(spec)
    }
}
