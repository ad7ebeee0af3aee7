use tracing::debug;

use crate::axis::{AxisLayoutEngine, build_axis_group, build_grid_group};
use crate::core::{
    AxisScale, BandScale, BoundingBox, LinearScale, MarginBox, PlotGeometry, ValueFormat,
};
use crate::interaction::HitPoint;
use crate::render::{Color, GroupKind, RectPrimitive, RenderGroup};
use crate::scroll::{ScrollDimensions, ScrollEngine};

use super::chart::{Chart, PlotContext, PlotModel, PlotOutput, ScrollPan};
use super::layout_helpers::{axis_translate, padded_domain, x_axis_config, y_axis_config};
use super::negotiation::MarginNegotiator;

pub type MultiBarChart<R> = Chart<MultiBarModel, R>;

/// Grouped or stacked vertical bars over a band x axis.
///
/// When the categories need more width than the plot has (every bar at
/// least `min_bar_width_px`), the bars and x axis scroll horizontally
/// together inside a clipped viewport.
#[derive(Debug)]
pub struct MultiBarModel {
    scroll: ScrollEngine,
    plot_origin: (f64, f64),
    axis_origin: (f64, f64),
    shadow_color: Color,
    hits: Vec<HitPoint>,
}

impl Default for MultiBarModel {
    fn default() -> Self {
        Self {
            scroll: ScrollEngine::new(true),
            plot_origin: (0.0, 0.0),
            axis_origin: (0.0, 0.0),
            shadow_color: Color::rgba(0.0, 0.0, 0.0, 0.3),
            hits: Vec::new(),
        }
    }
}

impl MultiBarModel {
    #[must_use]
    pub fn scroll(&self) -> &ScrollEngine {
        &self.scroll
    }

    fn scrolled_hits(&self) -> Vec<HitPoint> {
        let (dx, dy) = self.scroll.translate();
        self.hits
            .iter()
            .map(|hit| HitPoint {
                x: hit.x + dx,
                y: hit.y + dy,
                ..*hit
            })
            .collect()
    }
}

/// Category width needed so every bar keeps `min_bar_width` pixels.
fn content_width(
    inner_width: f64,
    categories: usize,
    bars_per_group: usize,
    min_bar_width: f64,
    group_spacing: f64,
) -> f64 {
    let min_step = min_bar_width * bars_per_group as f64 / (1.0 - group_spacing);
    inner_width.max(min_step * categories as f64)
}

impl PlotModel for MultiBarModel {
    fn plot(&mut self, context: &PlotContext<'_>) -> PlotOutput {
        let data = context.data;
        let categories = data.categories();
        let series: Vec<_> = data.enabled_series().collect();
        if categories.is_empty() || series.is_empty() {
            debug!("no categories or enabled series, nothing to plot");
            self.hits.clear();
            return PlotOutput::default();
        }

        let stacked = context.state.stacked;
        let values: Vec<Vec<f64>> = series
            .iter()
            .map(|(_, series)| {
                categories
                    .iter()
                    .map(|category| {
                        series
                            .values
                            .iter()
                            .find(|point| point.x.label() == *category)
                            .map_or(0.0, |point| point.y)
                    })
                    .map(|value| if value.is_finite() { value } else { 0.0 })
                    .collect()
            })
            .collect();

        let y_domain = if stacked {
            let sums = (0..categories.len()).flat_map(|column| {
                let (positive, negative) = values.iter().map(|row| row[column]).fold(
                    (0.0, 0.0),
                    |(positive, negative), value| {
                        if value >= 0.0 {
                            (positive + value, negative)
                        } else {
                            (positive, negative + value)
                        }
                    },
                );
                [positive, negative]
            });
            padded_domain(sums.chain([0.0]))
        } else {
            padded_domain(values.iter().flatten().copied().chain([0.0]))
        };

        let config = context.config;
        let spacing = config.group_spacing;
        let bars_per_group = if stacked { 1 } else { series.len() };
        let category_count = categories.len();
        let content = |inner_width: f64| {
            content_width(
                inner_width,
                category_count,
                bars_per_group,
                config.min_bar_width_px,
                spacing,
            )
        };

        let x_config = x_axis_config(&config.x_axis, ValueFormat::Text);
        let y_config = y_axis_config(&config.y_axis, ValueFormat::for_y(data.properties.y_data_type));
        let mut x_axis = AxisLayoutEngine::new(x_config.clone());
        let mut y_axis = AxisLayoutEngine::new(y_config.clone());

        let build_scales = |geometry: &PlotGeometry| {
            let x = BandScale::new(categories.clone(), (0.0, content(geometry.inner_width)))
                .with_padding(spacing, spacing * 0.5);
            let y = LinearScale::new(y_domain, (geometry.inner_height, 0.0));
            (AxisScale::Band(x), AxisScale::Linear(y))
        };

        let area = context.area;
        let outcome = MarginNegotiator::new(config.max_negotiation_passes).negotiate(
            area.width(),
            area.height(),
            &mut x_axis,
            &mut y_axis,
            context.measurer,
            &build_scales,
        );
        let geometry = outcome.geometry;
        let origin = (
            area.left + geometry.inner_margin.left,
            area.top + geometry.inner_margin.top,
        );
        let content_span = content(geometry.inner_width);

        self.scroll.set_dimensions(ScrollDimensions {
            width: geometry.inner_width,
            height: geometry.inner_height,
            margin: MarginBox::new(origin.1, 0.0, 0.0, origin.0),
            content_span,
        });
        let offset = self.scroll.offset();
        self.scroll.resize(offset, None);
        let scrolling = self.scroll.is_enabled();
        if scrolling {
            debug!(
                content_span,
                viewport = geometry.inner_width,
                offset = self.scroll.offset(),
                "bar content exceeds plot width, scrolling enabled"
            );
        }

        let x_band = BandScale::new(categories.clone(), (0.0, content_span))
            .with_padding(spacing, spacing * 0.5);
        let y_scale = LinearScale::new(y_domain, (geometry.inner_height, 0.0));
        let bar_width = x_band.bandwidth() / bars_per_group as f64;

        let mut plot = RenderGroup::new(GroupKind::Plot);
        self.hits.clear();
        for (row, (series_index, series)) in series.iter().enumerate() {
            let color = context
                .palette
                .series_color(*series_index, series.color.as_deref());
            for (column, &value) in values[row].iter().enumerate() {
                let (x, bottom_value) = if stacked {
                    let below: f64 = values[..row]
                        .iter()
                        .map(|other| other[column])
                        .filter(|other| (*other >= 0.0) == (value >= 0.0))
                        .sum();
                    (x_band.position(column), below)
                } else {
                    (x_band.position(column) + bar_width * row as f64, 0.0)
                };
                let y_start = y_scale.map(bottom_value);
                let y_end = y_scale.map(bottom_value + value);
                let (top, bottom) = (y_start.min(y_end), y_start.max(y_end));
                plot.rects.push(RectPrimitive::new(
                    x,
                    top,
                    bar_width.max(0.0),
                    (bottom - top).max(0.0),
                    color,
                ));
                let point_index = series
                    .values
                    .iter()
                    .position(|point| point.x.label() == categories[column]);
                if let Some(point_index) = point_index {
                    let tip = if value >= 0.0 { top } else { bottom };
                    self.hits.push(HitPoint {
                        x: origin.0 + x + bar_width * 0.5,
                        y: origin.1 + tip,
                        series_index: *series_index,
                        point_index,
                    });
                }
            }
        }

        let x_state = &outcome.x_state;
        let y_state = &outcome.y_state;
        let clip = self.scroll.clip_rect();
        let (dx, dy) = self.scroll.translate();
        self.plot_origin = origin;
        self.axis_origin = axis_translate(x_state.orientation, origin, &geometry);
        let y_translate = axis_translate(y_state.orientation, origin, &geometry);
        self.shadow_color = context.palette.axis.with_alpha(0.3);

        let mut plot = plot.translated(self.plot_origin.0 + dx, self.plot_origin.1 + dy);
        let mut x_group = build_axis_group(x_state, &x_config, context.palette)
            .translated(self.axis_origin.0 + dx, self.axis_origin.1 + dy);
        if scrolling {
            plot = plot.clipped(clip);
            let (axis_top, axis_bottom) = if self.axis_origin.1 > clip.top {
                (clip.bottom, area.bottom)
            } else {
                (area.top, clip.top)
            };
            x_group = x_group.clipped(BoundingBox::new(clip.left, clip.right, axis_top, axis_bottom));
        }

        let mut groups = vec![
            build_grid_group(y_state, &y_config, context.palette)
                .translated(y_translate.0, y_translate.1),
            plot,
            x_group,
            build_axis_group(y_state, &y_config, context.palette)
                .translated(y_translate.0, y_translate.1),
        ];
        if scrolling {
            groups.push(self.scroll.shadow_group(self.shadow_color));
        }

        PlotOutput {
            groups,
            negotiation: Some(outcome),
            hit_points: self.scrolled_hits(),
        }
    }

    fn pan(&mut self, delta_x: f64, delta_y: f64) -> Option<ScrollPan> {
        if !self.scroll.is_enabled() {
            return None;
        }
        let offset = self.scroll.pan_gesture(delta_x, delta_y);
        let (dx, dy) = self.scroll.translate();
        Some(ScrollPan {
            offset,
            translations: vec![
                (GroupKind::Plot, (self.plot_origin.0 + dx, self.plot_origin.1 + dy)),
                (GroupKind::XAxis, (self.axis_origin.0 + dx, self.axis_origin.1 + dy)),
            ],
            shadow: Some(self.scroll.shadow_group(self.shadow_color)),
            hit_points: self.scrolled_hits(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::content_width;

    #[test]
    fn content_grows_only_when_bars_would_get_too_narrow() {
        assert_eq!(content_width(600.0, 4, 2, 16.0, 0.2), 600.0);
        assert_eq!(content_width(600.0, 30, 2, 16.0, 0.2), 1200.0);
    }
}
