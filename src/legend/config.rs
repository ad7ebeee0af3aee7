use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Inline rows allowed before the legend collapses into a dropdown.
pub const DEFAULT_LEGEND_ROWS_COUNT: usize = 3;
pub const LEGEND_SWATCH_SIZE_PX: f64 = 12.0;
/// Space between swatch and label plus trailing space before the next entry.
pub const LEGEND_GUTTER_PX: f64 = 10.0;
pub const LEGEND_ROW_HEIGHT_PX: f64 = 20.0;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendAlign {
    Left,
    #[default]
    Right,
    Center,
}

impl LegendAlign {
    /// Left and right trade places under right-to-left layout.
    #[must_use]
    pub fn resolve(self, rtl: bool) -> Self {
        match (self, rtl) {
            (Self::Left, true) => Self::Right,
            (Self::Right, true) => Self::Left,
            (align, _) => align,
        }
    }
}

/// Vertical placement: `Start` sits in the chart header, `Middle` centers
/// the legend against the container height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Start,
    Middle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendConfig {
    pub align: LegendAlign,
    pub position: LegendPosition,
    pub rows_count: usize,
    /// Equal-width columns; greedy row flow when false.
    #[serde(default = "default_true")]
    pub equal_columns: bool,
    /// Never collapse, whatever the row count.
    pub show_all: bool,
    /// Whether the collapsed dropdown starts open.
    pub show_menu: bool,
    pub rtl: bool,
    pub swatch_size_px: f64,
    pub gutter_px: f64,
    pub row_height_px: f64,
    pub font_size_px: f64,
    pub open_label: String,
    pub close_label: String,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            align: LegendAlign::Right,
            position: LegendPosition::Start,
            rows_count: DEFAULT_LEGEND_ROWS_COUNT,
            equal_columns: true,
            show_all: false,
            show_menu: false,
            rtl: false,
            swatch_size_px: LEGEND_SWATCH_SIZE_PX,
            gutter_px: LEGEND_GUTTER_PX,
            row_height_px: LEGEND_ROW_HEIGHT_PX,
            font_size_px: 12.0,
            open_label: "Show legend".to_owned(),
            close_label: "Hide legend".to_owned(),
        }
    }
}

impl LegendConfig {
    #[must_use]
    pub fn with_align(mut self, align: LegendAlign) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: LegendPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_rows_count(mut self, rows_count: usize) -> Self {
        self.rows_count = rows_count;
        self
    }

    #[must_use]
    pub fn with_equal_columns(mut self, equal_columns: bool) -> Self {
        self.equal_columns = equal_columns;
        self
    }

    #[must_use]
    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    #[must_use]
    pub fn with_show_menu(mut self, show_menu: bool) -> Self {
        self.show_menu = show_menu;
        self
    }

    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// Fixed footprint added to every measured label.
    #[must_use]
    pub fn entry_padding(&self) -> f64 {
        self.swatch_size_px + self.gutter_px
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.rows_count == 0 {
            return Err(ChartError::InvalidConfig(
                "legend `rowsCount` must be >= 1".to_owned(),
            ));
        }
        for (name, value) in [
            ("swatchSizePx", self.swatch_size_px),
            ("gutterPx", self.gutter_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "legend `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("rowHeightPx", self.row_height_px),
            ("fontSizePx", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "legend `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}
