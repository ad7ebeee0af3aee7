//! Axis layout: tick placement, label collision resolution (wrap, stagger,
//! rotate) and the perpendicular space an axis reserves.

mod collision;
mod config;
mod engine;
mod primitives;
mod tick;

pub use config::{
    AxisConfig, AxisOrientation, DEFAULT_ROTATE_TICKS_DEG, HORIZONTAL_TICK_SPACING_PX,
    LABEL_COLLISION_GAP_PX, VERTICAL_TICK_SPACING_PX, WRAP_LINE_HEIGHT_EM,
};
pub use engine::{AxisLayoutEngine, rotation_anchor};
pub use primitives::{build_axis_group, build_grid_group};
pub use tick::{AxisLabelLayout, AxisState, LabelStrategy, Tick};
