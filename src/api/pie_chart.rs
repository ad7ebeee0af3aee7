use std::f64::consts::TAU;

use tracing::debug;

use crate::interaction::HitPoint;
use crate::render::{ArcPrimitive, Color, GroupKind, RenderGroup, TextHAlign, TextPrimitive};

use super::chart::{Chart, PlotContext, PlotModel, PlotOutput};

const PIE_PADDING_PX: f64 = 10.0;
const LABEL_FONT_SIZE_PX: f64 = 11.0;
/// Slices below this share of the whole get no percent label.
const LABEL_MIN_FRACTION: f64 = 0.02;

pub type PieChart<R> = Chart<PieModel, R>;

/// One slice per enabled series, sized by the series total.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieModel;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slice {
    series_index: usize,
    start_angle: f64,
    end_angle: f64,
    fraction: f64,
}

fn slices(totals: &[(usize, f64)]) -> Vec<Slice> {
    let sum: f64 = totals.iter().map(|(_, total)| total).sum();
    if sum <= 0.0 {
        return Vec::new();
    }
    let mut angle = 0.0;
    totals
        .iter()
        .map(|&(series_index, total)| {
            let fraction = total / sum;
            let slice = Slice {
                series_index,
                start_angle: angle,
                end_angle: angle + fraction * TAU,
                fraction,
            };
            angle = slice.end_angle;
            slice
        })
        .collect()
}

/// Point at `radius` along the bisector of a clockwise-from-north sweep.
fn polar(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (center.0 + radius * angle.sin(), center.1 - radius * angle.cos())
}

impl PlotModel for PieModel {
    fn plot(&mut self, context: &PlotContext<'_>) -> PlotOutput {
        let totals: Vec<(usize, f64)> = context
            .data
            .enabled_series()
            .map(|(index, series)| (index, series.total()))
            .filter(|(_, total)| total.is_finite() && *total > 0.0)
            .collect();
        let slices = slices(&totals);
        if slices.is_empty() {
            debug!("no positive series totals, nothing to plot");
            return PlotOutput::default();
        }

        let area = context.area;
        let center = (
            (area.left + area.right) * 0.5,
            (area.top + area.bottom) * 0.5,
        );
        let outer_radius = (area.width().min(area.height()) * 0.5 - PIE_PADDING_PX).max(0.0);
        let inner_radius = outer_radius * context.config.donut_ratio;
        let label_radius = if inner_radius > 0.0 {
            (inner_radius + outer_radius) * 0.5
        } else {
            outer_radius * 0.6
        };

        let mut group = RenderGroup::new(GroupKind::Plot);
        let mut hit_points = Vec::with_capacity(slices.len());
        for slice in &slices {
            let series = &context.data.data[slice.series_index];
            group.arcs.push(ArcPrimitive {
                cx: center.0,
                cy: center.1,
                inner_radius,
                outer_radius,
                start_angle: slice.start_angle,
                end_angle: slice.end_angle,
                fill: context
                    .palette
                    .series_color(slice.series_index, series.color.as_deref()),
            });

            let mid = (slice.start_angle + slice.end_angle) * 0.5;
            let (x, y) = polar(center, label_radius, mid);
            if slice.fraction >= LABEL_MIN_FRACTION && outer_radius > 0.0 {
                group.texts.push(TextPrimitive::new(
                    format!("{:.0}%", slice.fraction * 100.0),
                    x,
                    y - LABEL_FONT_SIZE_PX * 0.5,
                    LABEL_FONT_SIZE_PX,
                    Color::rgb(1.0, 1.0, 1.0),
                    TextHAlign::Center,
                ));
            }
            hit_points.push(HitPoint {
                x,
                y,
                series_index: slice.series_index,
                point_index: 0,
            });
        }

        debug!(
            slices = slices.len(),
            outer_radius, inner_radius, "pie composed"
        );
        PlotOutput {
            groups: vec![group],
            negotiation: None,
            hit_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use approx::assert_relative_eq;

    use super::{polar, slices};

    #[test]
    fn slices_cover_the_full_circle_in_order() {
        let slices = slices(&[(0, 1.0), (2, 3.0)]);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].series_index, 0);
        assert_relative_eq!(slices[0].end_angle, FRAC_PI_2);
        assert_relative_eq!(slices[1].start_angle, FRAC_PI_2);
        assert_relative_eq!(slices[1].end_angle, TAU);
        assert_relative_eq!(slices[1].fraction, 0.75);
    }

    #[test]
    fn angles_run_clockwise_from_twelve_o_clock() {
        let (x, y) = polar((100.0, 100.0), 50.0, FRAC_PI_2);
        assert_relative_eq!(x, 150.0);
        assert_relative_eq!(y, 100.0);
        let (x, y) = polar((100.0, 100.0), 50.0, PI);
        assert_relative_eq!(x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(y, 150.0);
    }
}
