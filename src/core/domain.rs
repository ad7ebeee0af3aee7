//! Domain guards applied before scales are built.

/// Fraction of the value added on each side of a single-valued domain.
pub const DEGENERATE_DOMAIN_PADDING_RATIO: f64 = 0.10;

/// Widens a single-valued domain so the scale never has a zero-width span.
///
/// `[v, v]` becomes `[v - |v| * 0.1, v + |v| * 0.1]`, and `[0, 0]` becomes
/// `[-1, 1]`. Non-degenerate domains are returned ordered ascending.
#[must_use]
pub fn pad_degenerate_domain(min: f64, max: f64) -> (f64, f64) {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if lo != hi {
        return (lo, hi);
    }
    if lo == 0.0 {
        return (-1.0, 1.0);
    }
    let pad = lo.abs() * DEGENERATE_DOMAIN_PADDING_RATIO;
    (lo - pad, hi + pad)
}

/// Min/max over finite values, `None` when there are none.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
}

#[cfg(test)]
mod tests {
    use super::{extent, pad_degenerate_domain};

    #[test]
    fn single_value_is_widened_by_ten_percent() {
        assert_eq!(pad_degenerate_domain(5.0, 5.0), (4.5, 5.5));
        assert_eq!(pad_degenerate_domain(-20.0, -20.0), (-22.0, -18.0));
    }

    #[test]
    fn zero_widens_to_unit_interval() {
        assert_eq!(pad_degenerate_domain(0.0, 0.0), (-1.0, 1.0));
    }

    #[test]
    fn regular_domain_is_only_ordered() {
        assert_eq!(pad_degenerate_domain(9.0, 1.0), (1.0, 9.0));
    }

    #[test]
    fn extent_skips_non_finite_values() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }
}
