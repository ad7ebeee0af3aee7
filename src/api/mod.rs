//! Chart composition: configuration, the margin negotiation loop and the
//! chart types built on top of them.

mod chart;
mod config;
mod layout_helpers;
mod line_chart;
mod multibar_chart;
mod negotiation;
mod pie_chart;

pub use chart::{
    Chart, HIT_RADIUS_PX, MenuPan, NO_DATA_FONT_SIZE_PX, PlotContext, PlotModel, PlotOutput,
    ScrollPan,
};
pub use config::{ChartConfig, DEFAULT_MAX_NEGOTIATION_PASSES, NO_DATA_TEXT};
pub use line_chart::{LineChart, LineModel};
pub use multibar_chart::{MultiBarChart, MultiBarModel};
pub use negotiation::{MarginNegotiator, NegotiationOutcome};
pub use pie_chart::{PieChart, PieModel};
