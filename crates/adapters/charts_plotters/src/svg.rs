//! SVG chart renderer.

use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::*;

use agridash_app::ports::{ChartHandle, ChartRenderer};
use agridash_domain::chart::{Axis, AxisId, ChartSpec, Dataset, LegendPosition};
use agridash_domain::error::ChartError;
use agridash_domain::view::{CanvasId, Rgb, Rgba};

const FONT: &str = "sans-serif";
const MAX_X_LABELS: usize = 8;
const LABEL_AREA: u32 = 60;

/// Draws [`ChartSpec`]s into SVG strings of a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct SvgChartRenderer {
    width: u32,
    height: u32,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

impl SvgChartRenderer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A drawn chart.
#[derive(Debug, Clone)]
pub struct SvgChart {
    canvas: CanvasId,
    svg: String,
}

impl SvgChart {
    #[must_use]
    pub fn canvas(&self) -> CanvasId {
        self.canvas
    }
}

impl ChartHandle for SvgChart {
    fn markup(&self) -> &str {
        &self.svg
    }

    fn destroy(self) {
        tracing::trace!(canvas = %self.canvas, bytes = self.svg.len(), "chart released");
    }
}

impl ChartRenderer for SvgChartRenderer {
    type Chart = SvgChart;

    fn render(&self, spec: &ChartSpec) -> Result<SvgChart, ChartError> {
        if spec.labels.is_empty() {
            return Err(ChartError::Empty(spec.canvas.as_str()));
        }

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            draw(&root, spec).map_err(draw_error)?;
            root.present().map_err(draw_error)?;
        }

        tracing::debug!(canvas = %spec.canvas, points = spec.labels.len(), "chart drawn");
        Ok(SvgChart {
            canvas: spec.canvas,
            svg,
        })
    }
}

fn draw_error(err: DrawingAreaErrorKind<std::io::Error>) -> ChartError {
    ChartError::Draw(Box::new(err))
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn rgba(color: Rgba) -> RGBAColor {
    rgb(color.rgb).mix(color.alpha)
}

/// Y range covering every finite value, padded by 5%.
fn value_range(values: impl Iterator<Item = f64>, begin_at_zero: bool) -> Range<f64> {
    let (mut min, mut max) = values
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });
    if min > max {
        return 0.0..1.0;
    }
    if begin_at_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    let pad = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        (max - min) * 0.05
    };
    let start = if begin_at_zero && min >= 0.0 { 0.0 } else { min - pad };
    start..max + pad
}

fn axis_range(spec: &ChartSpec, axis: &Axis) -> Range<f64> {
    value_range(
        spec.datasets_on(axis.id)
            .flat_map(|dataset| dataset.data.iter().copied()),
        axis.begin_at_zero,
    )
}

/// Colour of the first dataset plotted against `id`, used for its title.
fn axis_color(spec: &ChartSpec, id: AxisId) -> RGBColor {
    spec.datasets_on(id)
        .next()
        .map_or(BLACK, |dataset| rgb(dataset.border_color))
}

fn area_series<DB: DrawingBackend>(dataset: &Dataset, baseline: f64) -> AreaSeries<DB, usize, f64> {
    let fill = if dataset.fill {
        rgba(dataset.background_color)
    } else {
        TRANSPARENT
    };
    AreaSeries::new(dataset.data.iter().copied().enumerate(), baseline, fill)
        .border_style(rgb(dataset.border_color).stroke_width(dataset.border_width))
}

fn legend_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::Top => SeriesLabelPosition::UpperMiddle,
        LegendPosition::Bottom => SeriesLabelPosition::LowerMiddle,
    }
}

fn draw(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    spec: &ChartSpec,
) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
    root.fill(&WHITE)?;

    let primary = spec.axis(AxisId::Y).map_or(0.0..1.0, |axis| axis_range(spec, axis));
    let last = spec.labels.len().saturating_sub(1).max(1);
    let font = FONT.into_font().style(if spec.title.bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    });
    let title_style = font
        .resize(f64::from(spec.title.size))
        .color(&rgb(spec.title.color));

    let mut builder = ChartBuilder::on(root);
    builder
        .caption(&spec.title.text, title_style)
        .margin(12)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA);
    if spec.is_dual_axis() {
        builder.right_y_label_area_size(LABEL_AREA);
    }
    let mut chart = builder.build_cartesian_2d(0..last, primary.clone())?;

    let format_x = |index: &usize| spec.labels.get(*index).cloned().unwrap_or_default();
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(spec.labels.len().min(MAX_X_LABELS))
        .x_label_formatter(&format_x)
        .light_line_style(TRANSPARENT);
    if !spec.x_grid {
        mesh.disable_x_mesh();
    }
    match spec.axis(AxisId::Y) {
        Some(Axis { grid: Some(grid), .. }) => {
            mesh.bold_line_style(rgba(*grid));
        }
        _ => {
            mesh.disable_y_mesh();
        }
    }
    if let Some(title) = spec.axis(AxisId::Y).and_then(|axis| axis.title.as_deref()) {
        mesh.y_desc(title)
            .axis_desc_style((FONT, 14).into_font().color(&axis_color(spec, AxisId::Y)));
    }
    mesh.draw()?;

    for dataset in spec.datasets_on(AxisId::Y) {
        let color = rgb(dataset.border_color);
        chart
            .draw_series(area_series(dataset, primary.start))?
            .label(dataset.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    let legend = legend_position(spec.legend);
    match spec.axis(AxisId::Y1) {
        Some(axis) => {
            let secondary = axis_range(spec, axis);
            let mut chart = chart.set_secondary_coord(0..last, secondary.clone());
            let mut axes = chart.configure_secondary_axes();
            if let Some(title) = axis.title.as_deref() {
                axes.y_desc(title)
                    .axis_desc_style((FONT, 14).into_font().color(&axis_color(spec, AxisId::Y1)));
            }
            axes.draw()?;

            for dataset in spec.datasets_on(AxisId::Y1) {
                let color = rgb(dataset.border_color);
                chart
                    .draw_secondary_series(area_series(dataset, secondary.start))?
                    .label(dataset.label.clone())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
                    });
            }
            chart
                .configure_series_labels()
                .position(legend)
                .background_style(WHITE.mix(0.8))
                .border_style(TRANSPARENT)
                .draw()?;
        }
        None => {
            chart
                .configure_series_labels()
                .position(legend)
                .background_style(WHITE.mix(0.8))
                .border_style(TRANSPARENT)
                .draw()?;
        }
    }

    Ok(())
}
