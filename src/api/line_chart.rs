use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::axis::{AxisLayoutEngine, build_axis_group, build_grid_group};
use crate::core::{
    AxisScale, BandScale, LinearScale, PlotGeometry, Series, TickValue, ValueFormat, XDataType,
    XValue,
};
use crate::interaction::{HitPoint, Interpolate};
use crate::render::{GroupKind, LinePrimitive, RectPrimitive, RenderGroup};

use super::chart::{Chart, PlotContext, PlotModel, PlotOutput};
use super::layout_helpers::{axis_translate, padded_domain, x_axis_config, y_axis_config};
use super::negotiation::MarginNegotiator;

const LINE_STROKE_PX: f64 = 1.5;
const MARKER_SIZE_PX: f64 = 5.0;

pub type LineChart<R> = Chart<LineModel, R>;

/// Lines over a numeric, datetime or ordinal x axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineModel;

enum XDomain {
    Numeric((f64, f64)),
    Ordinal(Vec<String>),
}

impl PlotModel for LineModel {
    fn plot(&mut self, context: &PlotContext<'_>) -> PlotOutput {
        let data = context.data;
        let series: Vec<_> = data
            .enabled_series()
            .filter(|(_, series)| !series.values.is_empty())
            .collect();
        if series.is_empty() {
            debug!("every series is disabled or empty, nothing to plot");
            return PlotOutput::default();
        }

        let ordinal = data.properties.x_data_type == XDataType::Ordinal
            || series
                .iter()
                .flat_map(|(_, series)| series.values.iter())
                .any(|point| point.x.as_number().is_none());
        let x_domain = if ordinal {
            XDomain::Ordinal(data.categories())
        } else {
            XDomain::Numeric(padded_domain(
                series
                    .iter()
                    .flat_map(|(_, series)| series.values.iter())
                    .filter_map(|point| point.x.as_number()),
            ))
        };
        let y_domain = padded_domain(
            series
                .iter()
                .flat_map(|(_, series)| series.values.iter())
                .map(|point| point.y),
        );

        let x_format = if ordinal {
            ValueFormat::Text
        } else {
            ValueFormat::for_x(data.properties.x_data_type)
        };
        let x_config = x_axis_config(&context.config.x_axis, x_format);
        let y_config = y_axis_config(
            &context.config.y_axis,
            ValueFormat::for_y(data.properties.y_data_type),
        );
        let mut x_axis = AxisLayoutEngine::new(x_config.clone());
        let mut y_axis = AxisLayoutEngine::new(y_config.clone());

        // A single x value: one tick at that value and no extent ticks.
        if let Some(single) = single_x(&series).filter(|_| !ordinal) {
            x_axis.set_tick_values(Some(vec![TickValue::Number(single)]));
            x_axis.show_max_min(false);
        }

        let build_scales = |geometry: &PlotGeometry| {
            let x = match &x_domain {
                XDomain::Numeric(domain) => {
                    AxisScale::Linear(LinearScale::new(*domain, (0.0, geometry.inner_width)))
                }
                XDomain::Ordinal(categories) => AxisScale::Band(BandScale::new(
                    categories.clone(),
                    (0.0, geometry.inner_width),
                )),
            };
            let y = AxisScale::Linear(LinearScale::new(y_domain, (geometry.inner_height, 0.0)));
            (x, y)
        };

        let area = context.area;
        let outcome = MarginNegotiator::new(context.config.max_negotiation_passes).negotiate(
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
        let (x_scale, y_scale) = build_scales(&geometry);
        let map_x = |value: &XValue| -> Option<f64> {
            match &x_scale {
                AxisScale::Linear(scale) => value.as_number().map(|x| scale.map(x)),
                AxisScale::Band(scale) => scale.index_of(&value.label()).map(|i| scale.center(i)),
            }
        };
        let y_linear = match &y_scale {
            AxisScale::Linear(scale) => *scale,
            AxisScale::Band(_) => LinearScale::new(y_domain, (geometry.inner_height, 0.0)),
        };

        let interpolate = context.state.interpolate;
        let mut plot = RenderGroup::new(GroupKind::Plot).translated(origin.0, origin.1);
        let mut hit_points = Vec::new();
        for (series_index, series) in &series {
            let color = context
                .palette
                .series_color(*series_index, series.color.as_deref());
            let mut mapped: Vec<(f64, f64, usize)> = series
                .values
                .iter()
                .enumerate()
                .filter_map(|(point_index, point)| {
                    let x = map_x(&point.x)?;
                    let y = y_linear.map(point.y);
                    (x.is_finite() && y.is_finite()).then_some((x, y, point_index))
                })
                .collect();
            mapped.sort_by(|a, b| a.0.total_cmp(&b.0));

            let path: Vec<(f64, f64)> = mapped.iter().map(|&(x, y, _)| (x, y)).collect();
            for ((x1, y1), (x2, y2)) in interpolated_segments(&path, interpolate) {
                plot.lines
                    .push(LinePrimitive::new(x1, y1, x2, y2, LINE_STROKE_PX, color));
            }
            if path.len() == 1 {
                let (x, y) = path[0];
                plot.rects.push(RectPrimitive::new(
                    x - MARKER_SIZE_PX * 0.5,
                    y - MARKER_SIZE_PX * 0.5,
                    MARKER_SIZE_PX,
                    MARKER_SIZE_PX,
                    color,
                ));
            }
            hit_points.extend(mapped.iter().map(|&(x, y, point_index)| HitPoint {
                x: origin.0 + x,
                y: origin.1 + y,
                series_index: *series_index,
                point_index,
            }));
        }

        let x_state = &outcome.x_state;
        let y_state = &outcome.y_state;
        let x_translate = axis_translate(x_state.orientation, origin, &geometry);
        let y_translate = axis_translate(y_state.orientation, origin, &geometry);
        let groups = vec![
            build_grid_group(y_state, &y_config, context.palette)
                .translated(y_translate.0, y_translate.1),
            build_grid_group(x_state, &x_config, context.palette)
                .translated(x_translate.0, x_translate.1),
            plot,
            build_axis_group(x_state, &x_config, context.palette)
                .translated(x_translate.0, x_translate.1),
            build_axis_group(y_state, &y_config, context.palette)
                .translated(y_translate.0, y_translate.1),
        ];

        PlotOutput {
            groups,
            negotiation: Some(outcome),
            hit_points,
        }
    }
}

/// The one x value shared by every point, if there is exactly one.
fn single_x(series: &[(usize, &Series)]) -> Option<f64> {
    let mut values = series
        .iter()
        .flat_map(|(_, series)| series.values.iter())
        .filter_map(|point| point.x.as_number());
    let first = values.next()?;
    values.all(|value| value == first).then_some(first)
}

type Segment = ((f64, f64), (f64, f64));

/// Straight segments tracing `points` under the interpolation mode.
pub(super) fn interpolated_segments(points: &[(f64, f64)], mode: Interpolate) -> Vec<Segment> {
    let mut segments = Vec::new();
    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        let corners: SmallVec<[(f64, f64); 4]> = match mode {
            Interpolate::Linear => smallvec![(x0, y0), (x1, y1)],
            Interpolate::StepAfter => smallvec![(x0, y0), (x1, y0), (x1, y1)],
            Interpolate::StepBefore => smallvec![(x0, y0), (x0, y1), (x1, y1)],
            Interpolate::Step => {
                let mid = (x0 + x1) * 0.5;
                smallvec![(x0, y0), (mid, y0), (mid, y1), (x1, y1)]
            }
        };
        segments.extend(
            corners
                .windows(2)
                .map(|edge| (edge[0], edge[1]))
                .filter(|(a, b)| a != b),
        );
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::interpolated_segments;
    use crate::interaction::Interpolate;

    #[test]
    fn step_modes_emit_axis_aligned_segments() {
        let points = [(0.0, 10.0), (10.0, 0.0)];
        assert_eq!(interpolated_segments(&points, Interpolate::Linear).len(), 1);
        assert_eq!(
            interpolated_segments(&points, Interpolate::StepAfter),
            vec![((0.0, 10.0), (10.0, 10.0)), ((10.0, 10.0), (10.0, 0.0))]
        );
        assert_eq!(interpolated_segments(&points, Interpolate::Step).len(), 3);
    }

    #[test]
    fn flat_steps_drop_zero_length_edges() {
        let points = [(0.0, 5.0), (10.0, 5.0)];
        assert_eq!(interpolated_segments(&points, Interpolate::StepBefore).len(), 1);
    }
}
