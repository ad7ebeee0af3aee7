use serde::{Deserialize, Serialize};

use crate::axis::{AxisConfig, AxisOrientation};
use crate::core::{MarginBox, Palette, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HIT_TEST_DEBOUNCE_MS, Interpolate};
use crate::legend::LegendConfig;
use crate::render::Color;

/// Upper bound on margin-negotiation passes before a layout is accepted as-is.
pub const DEFAULT_MAX_NEGOTIATION_PASSES: usize = 4;
pub const NO_DATA_TEXT: &str = "No Data Available.";

fn default_true() -> bool {
    true
}

/// Public chart configuration.
///
/// Serializable so host applications can persist chart setup and load it back
/// through `ChartConfig::from_json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    /// Fixed outer margin around everything, title and legend included.
    pub margin: MarginBox,
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub show_title: bool,
    pub title_font_size_px: f64,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    pub legend: LegendConfig,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    /// Series colors as hex strings; empty means the default palette.
    pub colors: Vec<String>,
    pub max_negotiation_passes: usize,
    pub no_data_text: String,
    /// Space between header rows (title, legend) and the plot.
    pub header_gap_px: f64,
    /// Narrowest bar before a multi-bar chart starts scrolling.
    pub min_bar_width_px: f64,
    /// Band padding between category groups, as a fraction of the step.
    pub group_spacing: f64,
    /// Inner radius of pie slices relative to the outer radius.
    pub donut_ratio: f64,
    pub hit_test_debounce_ms: u64,
    pub stacked: bool,
    pub interpolate: Interpolate,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 500.0,
            margin: MarginBox::uniform(10.0),
            title: None,
            show_title: true,
            title_font_size_px: 16.0,
            show_legend: true,
            legend: LegendConfig::default(),
            x_axis: AxisConfig::new(AxisOrientation::Bottom),
            y_axis: AxisConfig::new(AxisOrientation::Left),
            colors: Vec::new(),
            max_negotiation_passes: DEFAULT_MAX_NEGOTIATION_PASSES,
            no_data_text: NO_DATA_TEXT.to_owned(),
            header_gap_px: 10.0,
            min_bar_width_px: 16.0,
            group_spacing: 0.1,
            donut_ratio: 0.0,
            hit_test_debounce_ms: HIT_TEST_DEBOUNCE_MS,
            stacked: false,
            interpolate: Interpolate::Linear,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn with_margin(mut self, margin: MarginBox) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_show_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, x_axis: AxisConfig) -> Self {
        self.x_axis = x_axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, y_axis: AxisConfig) -> Self {
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_max_negotiation_passes(mut self, passes: usize) -> Self {
        self.max_negotiation_passes = passes;
        self
    }

    #[must_use]
    pub fn with_min_bar_width_px(mut self, width: f64) -> Self {
        self.min_bar_width_px = width;
        self
    }

    #[must_use]
    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    #[must_use]
    pub fn with_interpolate(mut self, interpolate: Interpolate) -> Self {
        self.interpolate = interpolate;
        self
    }

    #[must_use]
    pub fn with_donut_ratio(mut self, ratio: f64) -> Self {
        self.donut_ratio = ratio;
        self
    }

    /// Palette built from `colors`; invalid hex strings are rejected.
    pub fn palette(&self) -> ChartResult<Palette> {
        let colors = self
            .colors
            .iter()
            .map(|hex| Color::from_hex(hex))
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Palette::new(colors))
    }

    pub fn validate(&self) -> ChartResult<()> {
        let viewport = self.viewport();
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let margin = self.margin;
        if !margin.is_finite()
            || [margin.top, margin.right, margin.bottom, margin.left]
                .iter()
                .any(|value| *value < 0.0)
        {
            return Err(ChartError::InvalidConfig(
                "chart margin must be finite and >= 0".to_owned(),
            ));
        }
        if margin.horizontal() >= self.width || margin.vertical() >= self.height {
            return Err(ChartError::InvalidConfig(
                "chart margin leaves no room for the plot".to_owned(),
            ));
        }
        if self.max_negotiation_passes == 0 {
            return Err(ChartError::InvalidConfig(
                "`maxNegotiationPasses` must be >= 1".to_owned(),
            ));
        }
        for (name, value) in [
            ("titleFontSizePx", self.title_font_size_px),
            ("minBarWidthPx", self.min_bar_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if !self.header_gap_px.is_finite() || self.header_gap_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "`headerGapPx` must be finite and >= 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("groupSpacing", self.group_spacing),
            ("donutRatio", self.donut_ratio),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be within [0, 1)"
                )));
            }
        }
        self.legend.validate()?;
        self.x_axis.validate()?;
        self.y_axis.validate()?;
        self.palette().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;
    use crate::axis::AxisOrientation;
    use crate::error::ChartError;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ChartConfig::from_json(
            r#"{"width":640,"height":360,"xAxis":{"rotateTicks":45,"wrapTicks":true},"legend":{"align":"center","rowsCount":2}}"#,
        )
        .expect("config");
        assert_eq!(config.width, 640.0);
        assert_eq!(config.x_axis.rotate_ticks, 45.0);
        assert!(config.x_axis.wrap_ticks);
        assert!(config.x_axis.show_max_min);
        assert_eq!(config.y_axis.orientation, AxisOrientation::Left);
        assert_eq!(config.legend.rows_count, 2);
        assert_eq!(config.max_negotiation_passes, 4);
    }

    #[test]
    fn rejects_degenerate_viewport_and_colors() {
        assert!(matches!(
            ChartConfig::new(0.0, 100.0).validate(),
            Err(ChartError::InvalidViewport { .. })
        ));
        let config = ChartConfig::default().with_colors(vec!["#zzz".to_owned()]);
        assert!(config.validate().is_err());
        assert!(
            ChartConfig::default()
                .with_max_negotiation_passes(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_absurd_axis_tick_counts() {
        let result = ChartConfig::from_json(r#"{"xAxis":{"ticks":1000000000000}}"#);
        assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
        assert!(ChartConfig::from_json(r#"{"yAxis":{"ticks":12}}"#).is_ok());
    }
}
