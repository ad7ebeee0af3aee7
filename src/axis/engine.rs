use ordered_float::OrderedFloat;
use smallvec::smallvec;
use tracing::{debug, trace};

use crate::core::{AxisScale, MarginBox, TextMeasurer, TickValue};
use crate::render::TextHAlign;

use super::collision::{scan_collisions, suppress_min_max_overlaps, wrap_words};
use super::config::{
    AxisConfig, AxisOrientation, HORIZONTAL_TICK_SPACING_PX, VERTICAL_TICK_SPACING_PX,
};
use super::tick::{AxisLabelLayout, AxisState, LabelStrategy, Tick};

fn max_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.map(OrderedFloat).max().map(|value| value.0)
}

fn min_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.map(OrderedFloat).min().map(|value| value.0)
}

/// Text anchor for rotated labels: past 90 degrees the label reads toward
/// the tick from the other side.
#[must_use]
pub fn rotation_anchor(degrees: f64) -> TextHAlign {
    if degrees.rem_euclid(360.0) > 90.0 {
        TextHAlign::Right
    } else {
        TextHAlign::Left
    }
}

/// Computes tick placement, resolves label collisions and reports the space
/// one axis needs.
///
/// Layout is infallible: degenerate scales produce an empty axis and labels
/// that still overlap after rotation are drawn overlapping.
#[derive(Debug, Clone)]
pub struct AxisLayoutEngine {
    config: AxisConfig,
    tick_values: Option<Vec<TickValue>>,
    tick_size: f64,
    state: Option<AxisState>,
}

impl AxisLayoutEngine {
    #[must_use]
    pub fn new(config: AxisConfig) -> Self {
        Self {
            config,
            tick_values: None,
            tick_size: 0.0,
            state: None,
        }
    }

    #[must_use]
    pub fn with_tick_values(mut self, values: Vec<TickValue>) -> Self {
        self.tick_values = Some(values);
        self
    }

    #[must_use]
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AxisConfig {
        &mut self.config
    }

    /// Explicit tick values; `None` restores automatic ticks.
    pub fn set_tick_values(&mut self, values: Option<Vec<TickValue>>) {
        self.tick_values = values;
    }

    pub fn show_max_min(&mut self, enabled: bool) {
        self.config.show_max_min = enabled;
    }

    /// Sets the gridline length drawn into the plot. Label layout is unaffected.
    pub fn resize_tick_lines(&mut self, length: f64) {
        self.tick_size = if length.is_finite() { length.max(0.0) } else { 0.0 };
        if let Some(state) = self.state.as_mut() {
            state.tick_size = self.tick_size;
        }
    }

    #[must_use]
    pub fn tick_size(&self) -> f64 {
        self.tick_size
    }

    /// Result of the most recent `layout` call.
    #[must_use]
    pub fn state(&self) -> Option<&AxisState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn auto_tick_count(&self, span: f64) -> usize {
        if !span.is_finite() || span <= 0.0 {
            return 0;
        }
        let spacing = if self.config.orientation.is_horizontal() {
            HORIZONTAL_TICK_SPACING_PX
        } else {
            VERTICAL_TICK_SPACING_PX
        };
        (span / spacing).ceil() as usize
    }

    pub fn layout(&mut self, scale: &AxisScale, measurer: &dyn TextMeasurer) -> AxisState {
        let orientation = self.config.orientation;
        let range = scale.range();
        if scale.is_degenerate() {
            debug!(?orientation, "degenerate scale domain, axis has no ticks");
            let state = AxisState::empty(orientation, range, self.tick_size);
            self.state = Some(state.clone());
            return state;
        }

        let show_max_min = self.config.show_max_min && !scale.is_band();
        let values = match &self.tick_values {
            Some(values) => values.clone(),
            None => scale.ticks(
                self.config
                    .ticks
                    .unwrap_or_else(|| self.auto_tick_count(scale.span())),
            ),
        };
        let mut natural: Vec<Tick> = values
            .into_iter()
            .filter_map(|value| self.build_tick(scale, value, false, measurer))
            .collect();

        if show_max_min {
            if let Some((d0, d1)) = scale.extent() {
                let (lo, hi) = (d0.min(d1), d0.max(d1));
                let epsilon = (hi - lo).abs() * 1e-9;
                natural.retain(|tick| {
                    tick.value
                        .as_number()
                        .is_none_or(|v| (v - lo).abs() > epsilon && (v - hi).abs() > epsilon)
                });
                if let Some(min_tick) = self.build_tick(scale, TickValue::Number(lo), true, measurer)
                {
                    natural.insert(0, min_tick);
                }
                if let Some(max_tick) = self.build_tick(scale, TickValue::Number(hi), true, measurer)
                {
                    natural.push(max_tick);
                }
            }
        }

        if self.config.reduce_x_ticks && orientation.is_horizontal() && scale.is_band() {
            reduce_band_ticks(&mut natural, scale.span());
        }

        let gap = self.config.label_gap_px;
        let mut ticks = natural.clone();
        let mut strategy = LabelStrategy::None;
        let mut wrap_succeeded = false;
        let mut stagger_succeeded = false;

        if orientation.is_horizontal() && scan_collisions(&mut ticks, gap, 1) {
            let mut resolved = false;

            if self.config.wrap_ticks {
                if let AxisScale::Band(band) = scale {
                    let mut wrapped = natural.clone();
                    self.apply_wrap(&mut wrapped, band.bandwidth(), measurer);
                    if !scan_collisions(&mut wrapped, gap, 1) {
                        ticks = wrapped;
                        strategy = LabelStrategy::Wrap;
                        wrap_succeeded = true;
                        resolved = true;
                    }
                }
            }

            if !resolved && self.config.stagger_ticks {
                let mut staggered = natural.clone();
                self.apply_stagger(&mut staggered);
                if !scan_collisions(&mut staggered, gap, 2) {
                    ticks = staggered;
                    strategy = LabelStrategy::Stagger;
                    stagger_succeeded = true;
                    resolved = true;
                }
            }

            if !resolved {
                let degrees = self.config.effective_rotation();
                let mut rotated = natural.clone();
                self.apply_rotation(&mut rotated, degrees);
                ticks = rotated;
                strategy = LabelStrategy::Rotate { degrees };
            }
            debug!(?orientation, ?strategy, "resolved tick label collisions");
        }

        let hidden = suppress_min_max_overlaps(&mut ticks);
        let mut state = AxisState {
            orientation,
            range,
            ticks,
            margin: MarginBox::zero(),
            thickness: 0.0,
            label_strategy: strategy,
            wrap_succeeded,
            stagger_succeeded,
            show_max_min,
            tick_size: self.tick_size,
            axis_label: None,
        };
        self.measure_extent(&mut state, measurer);
        trace!(
            ?orientation,
            ticks = state.ticks.len(),
            hidden,
            thickness = state.thickness,
            "axis layout pass"
        );

        self.state = Some(state.clone());
        state
    }

    fn build_tick(
        &self,
        scale: &AxisScale,
        value: TickValue,
        is_min_or_max: bool,
        measurer: &dyn TextMeasurer,
    ) -> Option<Tick> {
        let pixel_position = scale.position(&value)?;
        if !pixel_position.is_finite() {
            return None;
        }
        let label = self.config.tick_format.format_tick(&value);
        let extent = measurer.measure(&label, self.config.font_size_px);
        let anchor = match self.config.orientation {
            AxisOrientation::Top | AxisOrientation::Bottom => TextHAlign::Center,
            AxisOrientation::Left => TextHAlign::Right,
            AxisOrientation::Right => TextHAlign::Left,
        };
        let is_zero = value.as_number() == Some(0.0);
        let mut tick = Tick {
            value,
            pixel_position,
            lines: smallvec![label.clone()],
            label,
            width: extent.width,
            height: extent.height,
            bounding_box: Default::default(),
            is_min_or_max,
            is_zero,
            overlaps_neighbor: false,
            hidden: false,
            row_offset: 0.0,
            rotation_deg: 0.0,
            anchor,
        };
        tick.place(self.config.orientation, self.config.tick_padding);
        Some(tick)
    }

    fn apply_wrap(&self, ticks: &mut [Tick], max_width: f64, measurer: &dyn TextMeasurer) {
        let font = self.config.font_size_px;
        let advance = self.config.wrap_line_height_em * font;
        for tick in ticks.iter_mut().filter(|tick| !tick.is_min_or_max) {
            let lines = wrap_words(&tick.label, max_width, font, measurer);
            let extents: Vec<_> = lines.iter().map(|line| measurer.measure(line, font)).collect();
            tick.width = max_of(extents.iter().map(|extent| extent.width)).unwrap_or(0.0);
            let first_height = extents.first().map_or(font, |extent| extent.height);
            tick.height = first_height + advance * (lines.len().saturating_sub(1)) as f64;
            tick.lines = lines;
            tick.place(self.config.orientation, self.config.tick_padding);
        }
    }

    fn apply_stagger(&self, ticks: &mut [Tick]) {
        let row_height = max_of(ticks.iter().map(|tick| tick.height)).unwrap_or(0.0);
        let mut ordinary: Vec<usize> = ticks
            .iter()
            .enumerate()
            .filter(|(_, tick)| !tick.is_min_or_max && tick.is_visible())
            .map(|(index, _)| index)
            .collect();
        ordinary.sort_by(|a, b| ticks[*a].pixel_position.total_cmp(&ticks[*b].pixel_position));
        for (position, index) in ordinary.into_iter().enumerate() {
            let tick = &mut ticks[index];
            tick.row_offset = if position % 2 == 1 { row_height } else { 0.0 };
            tick.place(self.config.orientation, self.config.tick_padding);
        }
    }

    fn apply_rotation(&self, ticks: &mut [Tick], degrees: f64) {
        let anchor = rotation_anchor(degrees);
        for tick in ticks.iter_mut() {
            tick.rotation_deg = degrees;
            tick.anchor = anchor;
            tick.place(self.config.orientation, self.config.tick_padding);
        }
    }

    fn measure_extent(&self, state: &mut AxisState, measurer: &dyn TextMeasurer) {
        let orientation = state.orientation;
        let boxes: Vec<_> = state.visible_ticks().map(|tick| tick.bounding_box).collect();
        let mut thickness = match orientation {
            AxisOrientation::Bottom => max_of(boxes.iter().map(|b| b.bottom)),
            AxisOrientation::Top => max_of(boxes.iter().map(|b| -b.top)),
            AxisOrientation::Left => max_of(boxes.iter().map(|b| -b.left)),
            AxisOrientation::Right => max_of(boxes.iter().map(|b| b.right)),
        }
        .unwrap_or(0.0)
        .max(0.0);

        let (range_lo, range_hi) = (
            state.range.0.min(state.range.1),
            state.range.0.max(state.range.1),
        );
        let (along_lo, along_hi) = if orientation.is_horizontal() {
            (
                min_of(boxes.iter().map(|b| b.left)),
                max_of(boxes.iter().map(|b| b.right)),
            )
        } else {
            (
                min_of(boxes.iter().map(|b| b.top)),
                max_of(boxes.iter().map(|b| b.bottom)),
            )
        };
        let start_overhang = along_lo.map_or(0.0, |lo| (range_lo - lo).max(0.0));
        let end_overhang = along_hi.map_or(0.0, |hi| (hi - range_hi).max(0.0));

        if let Some(text) = self
            .config
            .axis_label
            .as_deref()
            .filter(|text| !text.is_empty())
        {
            let extent = measurer.measure(text, self.config.font_size_px);
            let distance = self.config.axis_label_distance;
            let middle = (range_lo + range_hi) * 0.5;
            let layout = match orientation {
                AxisOrientation::Bottom => {
                    let y = thickness + distance;
                    thickness = y + extent.height;
                    AxisLabelLayout {
                        text: text.to_owned(),
                        x: middle,
                        y,
                        rotation_deg: 0.0,
                    }
                }
                AxisOrientation::Top => {
                    thickness += distance + extent.height;
                    AxisLabelLayout {
                        text: text.to_owned(),
                        x: middle,
                        y: -thickness,
                        rotation_deg: 0.0,
                    }
                }
                AxisOrientation::Left | AxisOrientation::Right => {
                    let across = if self.config.rotate_y_label {
                        extent.height
                    } else {
                        extent.width
                    };
                    thickness += distance + across;
                    let x = if orientation == AxisOrientation::Left {
                        -thickness
                    } else {
                        thickness - across
                    };
                    AxisLabelLayout {
                        text: text.to_owned(),
                        x,
                        y: middle,
                        rotation_deg: if self.config.rotate_y_label { -90.0 } else { 0.0 },
                    }
                }
            };
            state.axis_label = Some(layout);
        }

        state.thickness = thickness;
        state.margin = match orientation {
            AxisOrientation::Bottom => MarginBox::new(0.0, end_overhang, thickness, start_overhang),
            AxisOrientation::Top => MarginBox::new(thickness, end_overhang, 0.0, start_overhang),
            AxisOrientation::Left => MarginBox::new(start_overhang, 0.0, end_overhang, thickness),
            AxisOrientation::Right => MarginBox::new(start_overhang, thickness, end_overhang, 0.0),
        };
    }
}

/// Keeps roughly one band label per `HORIZONTAL_TICK_SPACING_PX`.
fn reduce_band_ticks(ticks: &mut [Tick], span: f64) {
    let slots = (span / HORIZONTAL_TICK_SPACING_PX).floor().max(1.0) as usize;
    let every = ticks.len().div_ceil(slots).max(1);
    for (index, tick) in ticks.iter_mut().enumerate() {
        if index % every != 0 {
            tick.hidden = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisLayoutEngine, rotation_anchor};
    use crate::axis::{AxisConfig, AxisOrientation, LabelStrategy};
    use crate::core::{AxisScale, BandScale, HeuristicTextMeasurer, LinearScale};
    use crate::render::TextHAlign;

    #[test]
    fn rotation_anchor_flips_past_ninety_degrees() {
        assert_eq!(rotation_anchor(30.0), TextHAlign::Left);
        assert_eq!(rotation_anchor(-45.0), TextHAlign::Right);
        assert_eq!(rotation_anchor(120.0), TextHAlign::Right);
    }

    #[test]
    fn auto_tick_count_is_denser_on_vertical_axes() {
        let horizontal = AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Bottom));
        let vertical = AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Left));
        assert_eq!(horizontal.auto_tick_count(600.0), 6);
        assert_eq!(vertical.auto_tick_count(480.0), 10);
        assert_eq!(vertical.auto_tick_count(0.0), 0);
    }

    #[test]
    fn reduce_x_ticks_hides_alternate_band_labels() {
        let categories: Vec<String> = (0..8).map(|i| format!("C{i}")).collect();
        let scale = AxisScale::Band(BandScale::new(categories, (0.0, 400.0)));
        let mut engine = AxisLayoutEngine::new(
            AxisConfig::new(AxisOrientation::Bottom).with_reduce_x_ticks(true),
        );
        let state = engine.layout(&scale, &HeuristicTextMeasurer);
        assert_eq!(state.visible_ticks().count(), 4);
        assert_eq!(state.label_strategy, LabelStrategy::None);
    }

    #[test]
    fn resize_tick_lines_only_touches_gridline_length() {
        let scale = AxisScale::Linear(LinearScale::new((0.0, 10.0), (300.0, 0.0)));
        let mut engine = AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Left));
        let before = engine.layout(&scale, &HeuristicTextMeasurer);
        engine.resize_tick_lines(480.0);
        let after = engine.state().expect("state").clone();
        assert_eq!(after.tick_size, 480.0);
        assert_eq!(after.ticks, before.ticks);
        assert_eq!(after.margin, before.margin);
    }
}
