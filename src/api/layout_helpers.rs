use crate::axis::{AxisConfig, AxisOrientation};
use crate::core::domain::extent;
use crate::core::{PlotGeometry, ValueFormat, pad_degenerate_domain};

/// X axis settings with a horizontal orientation and, unless the host set
/// one, the data-type formatter.
pub(super) fn x_axis_config(config: &AxisConfig, data_format: ValueFormat) -> AxisConfig {
    let mut axis = config.clone();
    if !axis.orientation.is_horizontal() {
        axis.orientation = AxisOrientation::Bottom;
    }
    if axis.tick_format == ValueFormat::default() {
        axis.tick_format = data_format;
    }
    axis
}

pub(super) fn y_axis_config(config: &AxisConfig, data_format: ValueFormat) -> AxisConfig {
    let mut axis = config.clone();
    if axis.orientation.is_horizontal() {
        axis.orientation = AxisOrientation::Left;
    }
    if axis.tick_format == ValueFormat::default() {
        axis.tick_format = data_format;
    }
    axis
}

/// Translation of an axis group whose plot starts at `origin`.
pub(super) fn axis_translate(
    orientation: AxisOrientation,
    origin: (f64, f64),
    geometry: &PlotGeometry,
) -> (f64, f64) {
    match orientation {
        AxisOrientation::Bottom => (origin.0, origin.1 + geometry.inner_height),
        AxisOrientation::Top | AxisOrientation::Left => origin,
        AxisOrientation::Right => (origin.0 + geometry.inner_width, origin.1),
    }
}

/// Ascending domain over finite values, widened when it collapses to a point.
pub(super) fn padded_domain(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = extent(values).unwrap_or((0.0, 0.0));
    pad_degenerate_domain(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::{padded_domain, x_axis_config, y_axis_config};
    use crate::axis::{AxisConfig, AxisOrientation};
    use crate::core::ValueFormat;

    #[test]
    fn axis_orientation_is_coerced_per_edge() {
        let x = x_axis_config(&AxisConfig::new(AxisOrientation::Left), ValueFormat::Text);
        let y = y_axis_config(&AxisConfig::new(AxisOrientation::Top), ValueFormat::Text);
        assert_eq!(x.orientation, AxisOrientation::Bottom);
        assert_eq!(x.tick_format, ValueFormat::Text);
        assert_eq!(y.orientation, AxisOrientation::Left);
    }

    #[test]
    fn collapsed_domains_are_widened() {
        assert_eq!(padded_domain([5.0]), (4.5, 5.5));
        assert_eq!(padded_domain(std::iter::empty()), (-1.0, 1.0));
        assert_eq!(padded_domain([3.0, -2.0, f64::NAN]), (-2.0, 3.0));
    }
}
