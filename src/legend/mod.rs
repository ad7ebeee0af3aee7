//! Legend layout: equal-column or flowing rows of swatches, collapsing into a
//! toggle link with a scrollable dropdown past `rows_count` rows.

mod config;
mod engine;
mod layout;
mod primitives;

pub use config::{
    DEFAULT_LEGEND_ROWS_COUNT, LEGEND_GUTTER_PX, LEGEND_ROW_HEIGHT_PX, LEGEND_SWATCH_SIZE_PX,
    LegendAlign, LegendConfig, LegendPosition,
};
pub use engine::{LegendDropdown, LegendLayoutEngine};
pub use layout::{EntryPosition, LegendEntry, LegendLayout};
pub use primitives::build_legend_groups;
