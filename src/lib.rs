//! svgchart: declarative SVG charts with responsive layout.
//!
//! A chart is configured once (`ChartConfig`), fed series data
//! (`ChartData`) and rendered into a `RenderFrame` of positioned groups that
//! any `Renderer` can draw; `SvgRenderer` produces an SVG document.
//!
//! Layout is where most of the work happens:
//! - `axis` places ticks and resolves label collisions by wrapping,
//!   staggering or rotating, and reports the margin an axis needs.
//! - `legend` arranges entries in equal columns or flowing rows and
//!   collapses into a dropdown menu when there are too many.
//! - `api::MarginNegotiator` iterates axis layout against plot size until the
//!   margins settle.
//! - `scroll` clamps horizontal or vertical panning of content wider than its
//!   viewport and fades edge shadows in and out.

pub mod api;
pub mod axis;
pub mod core;
pub mod error;
pub mod interaction;
pub mod legend;
pub mod render;
pub mod scroll;
pub mod telemetry;

pub use api::{
    Chart, ChartConfig, LineChart, MarginNegotiator, MultiBarChart, NegotiationOutcome, PieChart,
    PlotModel,
};
pub use core::{ChartData, Point, Series, Viewport};
pub use error::{ChartError, ChartResult};
pub use render::{NullRenderer, RenderFrame, Renderer, SvgRenderer};
