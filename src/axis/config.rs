use serde::{Deserialize, Serialize};

use crate::core::{MAX_TICK_COUNT, ValueFormat};
use crate::error::{ChartError, ChartResult};

/// Clearance required between adjacent horizontal labels.
pub const LABEL_COLLISION_GAP_PX: f64 = 6.0;
/// Rotation applied when wrapping and staggering cannot resolve collisions.
pub const DEFAULT_ROTATE_TICKS_DEG: f64 = 30.0;
/// Line advance for wrapped labels, in multiples of the font size.
pub const WRAP_LINE_HEIGHT_EM: f64 = 1.1;
/// One automatic tick per this many pixels on horizontal axes.
pub const HORIZONTAL_TICK_SPACING_PX: f64 = 100.0;
/// Label height is smaller than label width, so vertical axes tick denser.
pub const VERTICAL_TICK_SPACING_PX: f64 = 48.0;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientation {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl AxisOrientation {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Host-tunable axis behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    pub orientation: AxisOrientation,
    /// Draw the domain extents as ticks even off the regular increment.
    /// Forced off for band scales.
    #[serde(default = "default_true")]
    pub show_max_min: bool,
    /// Emphasize the gridline at value 0.
    #[serde(default = "default_true")]
    pub highlight_zero: bool,
    pub wrap_ticks: bool,
    pub stagger_ticks: bool,
    /// Fallback label rotation in degrees.
    pub rotate_ticks: f64,
    /// Thin band-axis labels to about one per `HORIZONTAL_TICK_SPACING_PX`.
    pub reduce_x_ticks: bool,
    #[serde(default = "default_true")]
    pub rotate_y_label: bool,
    pub tick_padding: f64,
    pub axis_label: Option<String>,
    pub axis_label_distance: f64,
    pub font_size_px: f64,
    pub label_gap_px: f64,
    pub wrap_line_height_em: f64,
    /// Explicit tick count; automatic from the axis span when `None`.
    pub ticks: Option<usize>,
    pub tick_format: ValueFormat,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            orientation: AxisOrientation::Bottom,
            show_max_min: true,
            highlight_zero: true,
            wrap_ticks: false,
            stagger_ticks: false,
            rotate_ticks: DEFAULT_ROTATE_TICKS_DEG,
            reduce_x_ticks: false,
            rotate_y_label: true,
            tick_padding: 4.0,
            axis_label: None,
            axis_label_distance: 12.0,
            font_size_px: 12.0,
            label_gap_px: LABEL_COLLISION_GAP_PX,
            wrap_line_height_em: WRAP_LINE_HEIGHT_EM,
            ticks: None,
            tick_format: ValueFormat::default(),
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn new(orientation: AxisOrientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_show_max_min(mut self, show_max_min: bool) -> Self {
        self.show_max_min = show_max_min;
        self
    }

    #[must_use]
    pub fn with_wrap_ticks(mut self, wrap_ticks: bool) -> Self {
        self.wrap_ticks = wrap_ticks;
        self
    }

    #[must_use]
    pub fn with_stagger_ticks(mut self, stagger_ticks: bool) -> Self {
        self.stagger_ticks = stagger_ticks;
        self
    }

    #[must_use]
    pub fn with_rotate_ticks(mut self, degrees: f64) -> Self {
        self.rotate_ticks = degrees;
        self
    }

    #[must_use]
    pub fn with_reduce_x_ticks(mut self, reduce: bool) -> Self {
        self.reduce_x_ticks = reduce;
        self
    }

    #[must_use]
    pub fn with_highlight_zero(mut self, highlight: bool) -> Self {
        self.highlight_zero = highlight;
        self
    }

    #[must_use]
    pub fn with_axis_label(mut self, label: impl Into<String>) -> Self {
        self.axis_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_tick_padding(mut self, padding: f64) -> Self {
        self.tick_padding = padding;
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, count: usize) -> Self {
        self.ticks = Some(count);
        self
    }

    #[must_use]
    pub fn with_tick_format(mut self, format: ValueFormat) -> Self {
        self.tick_format = format;
        self
    }

    /// Rotation angle with non-finite input replaced by the default.
    #[must_use]
    pub fn effective_rotation(&self) -> f64 {
        if self.rotate_ticks.is_finite() {
            self.rotate_ticks
        } else {
            DEFAULT_ROTATE_TICKS_DEG
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("tickPadding", self.tick_padding),
            ("axisLabelDistance", self.axis_label_distance),
            ("labelGapPx", self.label_gap_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "axis font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.wrap_line_height_em.is_finite() || self.wrap_line_height_em <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "axis wrap line height must be finite and > 0".to_owned(),
            ));
        }
        if self.ticks.is_some_and(|count| count > MAX_TICK_COUNT) {
            return Err(ChartError::InvalidConfig(format!(
                "axis `ticks` must be <= {MAX_TICK_COUNT}"
            )));
        }
        Ok(())
    }
}
