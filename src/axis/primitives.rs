use crate::core::Palette;
use crate::render::{GroupKind, LinePrimitive, RenderGroup, TextHAlign, TextPrimitive};

use super::config::{AxisConfig, AxisOrientation};
use super::tick::AxisState;

const GRID_STROKE_PX: f64 = 1.0;
const ZERO_LINE_STROKE_PX: f64 = 1.5;

/// Gridlines for a laid-out axis, in axis-local coordinates.
#[must_use]
pub fn build_grid_group(state: &AxisState, config: &AxisConfig, palette: &Palette) -> RenderGroup {
    let mut group = RenderGroup::new(GroupKind::Grid);
    if state.tick_size <= 0.0 {
        return group;
    }
    for tick in state.ticks.iter().filter(|tick| !tick.is_min_or_max) {
        let p = tick.pixel_position;
        let (x1, y1, x2, y2) = match state.orientation {
            AxisOrientation::Bottom => (p, 0.0, p, -state.tick_size),
            AxisOrientation::Top => (p, 0.0, p, state.tick_size),
            AxisOrientation::Left => (0.0, p, state.tick_size, p),
            AxisOrientation::Right => (0.0, p, -state.tick_size, p),
        };
        let (width, color) = if config.highlight_zero && tick.is_zero {
            (ZERO_LINE_STROKE_PX, palette.axis)
        } else {
            (GRID_STROKE_PX, palette.grid)
        };
        group
            .lines
            .push(LinePrimitive::new(x1, y1, x2, y2, width, color));
    }
    group
}

/// Domain line, tick labels and axis title.
#[must_use]
pub fn build_axis_group(state: &AxisState, config: &AxisConfig, palette: &Palette) -> RenderGroup {
    let kind = if state.orientation.is_horizontal() {
        GroupKind::XAxis
    } else {
        GroupKind::YAxis
    };
    let mut group = RenderGroup::new(kind);
    let (start, end) = state.range;
    let domain_line = if state.orientation.is_horizontal() {
        LinePrimitive::new(start, 0.0, end, 0.0, GRID_STROKE_PX, palette.axis)
    } else {
        LinePrimitive::new(0.0, start, 0.0, end, GRID_STROKE_PX, palette.axis)
    };
    group.lines.push(domain_line);

    let font = config.font_size_px;
    let advance = config.wrap_line_height_em * font;
    for tick in &state.ticks {
        let (ax, ay) = tick.anchor_point(state.orientation, config.tick_padding);
        let top = match state.orientation {
            AxisOrientation::Bottom => ay,
            AxisOrientation::Top => ay - tick.height,
            AxisOrientation::Left | AxisOrientation::Right => ay - tick.height * 0.5,
        };
        let opacity = if tick.hidden { 0.0 } else { 1.0 };
        for (index, line) in tick.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            group.texts.push(
                TextPrimitive::new(
                    line.clone(),
                    ax,
                    top + advance * index as f64,
                    font,
                    palette.text,
                    tick.anchor,
                )
                .rotated(tick.rotation_deg)
                .with_opacity(opacity),
            );
        }
    }

    if let Some(label) = &state.axis_label {
        group.texts.push(
            TextPrimitive::new(
                label.text.clone(),
                label.x,
                label.y,
                font,
                palette.text,
                TextHAlign::Center,
            )
            .rotated(label.rotation_deg),
        );
    }
    group
}
