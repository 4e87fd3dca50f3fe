//! Chart specifications for the two history charts.
//!
//! A [`ChartSpec`] is a renderer-agnostic description of a multi-series line
//! chart: labels, datasets, axes and the fixed visual theme. Renderers in
//! adapter crates turn it into pixels.

use crate::history::HistorySeries;
use crate::view::{CanvasId, Rgb, Rgba};

/// Title colour shared by both charts.
pub const TITLE_COLOR: Rgb = Rgb(0x66, 0x7e, 0xea);
pub const TEMPERATURE_COLOR: Rgb = Rgb(0xef, 0x44, 0x44);
pub const HUMIDITY_COLOR: Rgb = Rgb(0x3b, 0x82, 0xf6);
pub const SOIL_COLOR: Rgb = Rgb(0x10, 0xb9, 0x81);
pub const LIGHT_COLOR: Rgb = Rgb(0xf5, 0x9e, 0x0b);

const FILL_ALPHA: f64 = 0.1;
const GRID_COLOR: Rgba = Rgb(0, 0, 0).with_alpha(0.05);

/// Identifier of a y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    /// Primary (left) axis.
    Y,
    /// Secondary (right) axis.
    Y1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Left,
    Right,
}

/// A value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub id: AxisId,
    pub position: AxisPosition,
    pub title: Option<String>,
    /// Force zero into the visible range.
    pub begin_at_zero: bool,
    /// Grid line colour; `None` hides grid lines in the plot area.
    pub grid: Option<Rgba>,
}

/// One line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: Rgb,
    pub background_color: Rgba,
    pub border_width: u32,
    /// Bezier smoothing factor (`0.0` draws straight segments).
    pub tension: f64,
    /// Fill the area below the line with `background_color`.
    pub fill: bool,
    pub axis: AxisId,
}

impl Dataset {
    fn themed(label: &str, data: Vec<f64>, color: Rgb, axis: AxisId) -> Self {
        Self {
            label: label.to_string(),
            data,
            border_color: color,
            background_color: color.with_alpha(FILL_ALPHA),
            border_width: 2,
            tension: 0.4,
            fill: true,
            axis,
        }
    }
}

/// Chart title.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
    pub size: u32,
    pub bold: bool,
    pub color: Rgb,
}

/// How tooltips and hover pick their points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// Every dataset at the hovered x-index.
    Index,
    /// Nearest point along the x-axis.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub mode: InteractionMode,
    /// Only trigger when the pointer intersects a point.
    pub intersect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Top,
    Bottom,
}

/// Renderer-agnostic description of a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub canvas: CanvasId,
    pub title: Title,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub axes: Vec<Axis>,
    pub legend: LegendPosition,
    pub tooltip: Interaction,
    pub hover: Interaction,
    /// Rotation of x tick labels, in degrees.
    pub x_tick_rotation: u32,
    /// Draw vertical grid lines.
    pub x_grid: bool,
    /// Preferred container height, in pixels.
    pub height: u32,
}

impl ChartSpec {
    fn themed(canvas: CanvasId, title: &str, labels: Vec<String>) -> Self {
        Self {
            canvas,
            title: Title {
                text: title.to_string(),
                size: 16,
                bold: true,
                color: TITLE_COLOR,
            },
            labels,
            datasets: Vec::new(),
            axes: Vec::new(),
            legend: LegendPosition::Top,
            tooltip: Interaction {
                mode: InteractionMode::Index,
                intersect: false,
            },
            hover: Interaction {
                mode: InteractionMode::Nearest,
                intersect: false,
            },
            x_tick_rotation: 45,
            x_grid: false,
            height: 400,
        }
    }

    /// Look up an axis by id.
    #[must_use]
    pub fn axis(&self, id: AxisId) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.id == id)
    }

    /// Datasets plotted against the given axis.
    pub fn datasets_on(&self, id: AxisId) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter().filter(move |ds| ds.axis == id)
    }

    /// Whether the chart uses a secondary axis.
    #[must_use]
    pub fn is_dual_axis(&self) -> bool {
        self.axis(AxisId::Y1).is_some()
    }
}

/// Temperature and humidity on a single shared y-axis.
#[must_use]
pub fn temperature_chart(labels: Vec<String>, temperature: Vec<f64>, humidity: Vec<f64>) -> ChartSpec {
    let mut spec = ChartSpec::themed(
        CanvasId::Temperature,
        "Temperature & Humidity Over Time",
        labels,
    );
    spec.datasets = vec![
        Dataset::themed("Temperature (\u{b0}C)", temperature, TEMPERATURE_COLOR, AxisId::Y),
        Dataset::themed("Humidity (%)", humidity, HUMIDITY_COLOR, AxisId::Y),
    ];
    spec.axes = vec![Axis {
        id: AxisId::Y,
        position: AxisPosition::Left,
        title: None,
        begin_at_zero: false,
        grid: Some(GRID_COLOR),
    }];
    spec
}

/// Soil moisture (left axis) and light level (right axis).
///
/// The two quantities have unrelated scales, hence independent axes.
#[must_use]
pub fn soil_chart(labels: Vec<String>, soil_moisture: Vec<f64>, light_level: Vec<f64>) -> ChartSpec {
    let mut spec = ChartSpec::themed(
        CanvasId::SoilLight,
        "Soil Moisture & Light Level Over Time",
        labels,
    );
    spec.datasets = vec![
        Dataset::themed("Soil Moisture", soil_moisture, SOIL_COLOR, AxisId::Y),
        Dataset::themed("Light Level", light_level, LIGHT_COLOR, AxisId::Y1),
    ];
    spec.axes = vec![
        Axis {
            id: AxisId::Y,
            position: AxisPosition::Left,
            title: Some("Soil Moisture".to_string()),
            begin_at_zero: false,
            grid: Some(GRID_COLOR),
        },
        Axis {
            id: AxisId::Y1,
            position: AxisPosition::Right,
            title: Some("Light Level".to_string()),
            begin_at_zero: false,
            grid: None,
        },
    ];
    spec
}

impl HistorySeries {
    /// Both chart specs for this window.
    #[must_use]
    pub fn chart_specs(&self) -> [ChartSpec; 2] {
        [
            temperature_chart(
                self.labels.clone(),
                self.temperature.clone(),
                self.humidity.clone(),
            ),
            soil_chart(
                self.labels.clone(),
                self.soil_moisture.clone(),
                self.light_level.clone(),
            ),
        ]
    }
}
