use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BoundingBox, MarginBox, TickValue};
use crate::render::TextHAlign;

use super::config::AxisOrientation;

/// How horizontal label collisions were resolved on the last pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LabelStrategy {
    #[default]
    None,
    Wrap,
    Stagger,
    Rotate { degrees: f64 },
}

/// One labeled marker, recomputed on every layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: TickValue,
    pub pixel_position: f64,
    pub label: String,
    /// Label lines; a single entry unless wrapped.
    pub lines: SmallVec<[String; 2]>,
    pub width: f64,
    pub height: f64,
    pub bounding_box: BoundingBox,
    pub is_min_or_max: bool,
    pub is_zero: bool,
    /// Transient: set by the collision scan of the current pass.
    pub overlaps_neighbor: bool,
    /// Hidden labels keep their slot but render at zero opacity.
    pub hidden: bool,
    /// Extra perpendicular offset (second stagger row).
    pub row_offset: f64,
    pub rotation_deg: f64,
    pub anchor: TextHAlign,
}

impl Tick {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Axis-local anchor point of the label for `orientation`.
    #[must_use]
    pub fn anchor_point(&self, orientation: AxisOrientation, padding: f64) -> (f64, f64) {
        match orientation {
            AxisOrientation::Bottom => (self.pixel_position, padding + self.row_offset),
            AxisOrientation::Top => (self.pixel_position, -(padding + self.row_offset)),
            AxisOrientation::Left => (-padding, self.pixel_position),
            AxisOrientation::Right => (padding, self.pixel_position),
        }
    }

    /// Recomputes `bounding_box` from size, anchor, offset and rotation.
    pub fn place(&mut self, orientation: AxisOrientation, padding: f64) {
        let (w, h) = (self.width, self.height);
        let (x0, x1) = match self.anchor {
            TextHAlign::Left => (0.0, w),
            TextHAlign::Center => (-w * 0.5, w * 0.5),
            TextHAlign::Right => (-w, 0.0),
        };
        let (y0, y1) = match orientation {
            AxisOrientation::Bottom => (0.0, h),
            AxisOrientation::Top => (-h, 0.0),
            AxisOrientation::Left | AxisOrientation::Right => (-h * 0.5, h * 0.5),
        };
        let (ax, ay) = self.anchor_point(orientation, padding);
        if self.rotation_deg == 0.0 {
            self.bounding_box = BoundingBox::new(ax + x0, ax + x1, ay + y0, ay + y1);
            return;
        }

        let radians = match orientation {
            AxisOrientation::Top => -self.rotation_deg.to_radians(),
            _ => self.rotation_deg.to_radians(),
        };
        let (sin, cos) = radians.sin_cos();
        let corners = [(x0, y0), (x1, y0), (x0, y1), (x1, y1)].map(|(x, y)| {
            (ax + x * cos - y * sin, ay + x * sin + y * cos)
        });
        self.bounding_box = BoundingBox::from_points(&corners);
    }
}

/// Placement of the axis title.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabelLayout {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

/// Output of one axis layout pass.
///
/// `margin` and `thickness` are what the owning chart reads back during
/// margin negotiation; the rest drives drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisState {
    pub orientation: AxisOrientation,
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
    pub margin: MarginBox,
    pub thickness: f64,
    pub label_strategy: LabelStrategy,
    pub wrap_succeeded: bool,
    pub stagger_succeeded: bool,
    /// Effective min/max flag after band-scale override.
    pub show_max_min: bool,
    /// Gridline length drawn from the axis into the plot.
    pub tick_size: f64,
    pub axis_label: Option<AxisLabelLayout>,
}

impl AxisState {
    #[must_use]
    pub fn empty(orientation: AxisOrientation, range: (f64, f64), tick_size: f64) -> Self {
        Self {
            orientation,
            range,
            ticks: Vec::new(),
            margin: MarginBox::zero(),
            thickness: 0.0,
            label_strategy: LabelStrategy::None,
            wrap_succeeded: false,
            stagger_succeeded: false,
            show_max_min: false,
            tick_size,
            axis_label: None,
        }
    }

    pub fn visible_ticks(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|tick| tick.is_visible())
    }
}
