pub mod data;
pub mod domain;
pub mod format;
pub mod measure;
pub mod palette;
pub mod scale;
pub mod transform;
pub mod types;

pub use data::{ChartData, ChartProperties, Point, Series, XDataType, XValue, YDataType};
pub use domain::pad_degenerate_domain;
pub use format::ValueFormat;
pub use measure::{HeuristicTextMeasurer, TextExtent, TextMeasurer};
pub use palette::Palette;
pub use scale::{AxisScale, BandScale, LinearScale, MAX_TICK_COUNT, TickValue};
pub use types::{BoundingBox, MarginBox, PlotGeometry, Viewport};
