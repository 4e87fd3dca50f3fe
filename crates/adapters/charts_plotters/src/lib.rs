//! # agridash-adapter-charts-plotters
//!
//! Driven adapter implementing [`ChartRenderer`](agridash_app::ports::ChartRenderer)
//! with [plotters](https://docs.rs/plotters), producing SVG documents that
//! the page server embeds or serves directly.
//!
//! ## Limits of the rendition
//! plotters draws straight segments between points and only rotates text by
//! multiples of 90°, so curve tension and the 45° x-tick rotation carried by
//! a [`ChartSpec`](agridash_domain::chart::ChartSpec) are not reproduced. X
//! labels are thinned out instead. Tooltip and hover settings have no
//! meaning for a static image.

mod svg;

pub use svg::{SvgChart, SvgChartRenderer};
