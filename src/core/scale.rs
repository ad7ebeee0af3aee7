use serde::{Deserialize, Serialize};

const SQRT_50: f64 = 7.071_067_811_865_476;
const SQRT_10: f64 = 3.162_277_660_168_379_5;
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Upper bound on the tick count a linear scale will honour.
pub const MAX_TICK_COUNT: usize = 1_000;

/// Continuous domain-to-pixel mapping.
///
/// A degenerate domain (`start == end`) is representable so callers can
/// detect it; it maps every value to the middle of the range and yields no
/// ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self::new(self.domain(), range)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !self.domain_start.is_finite()
            || !self.domain_end.is_finite()
            || self.domain_start == self.domain_end
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return (self.range_start + self.range_end) * 0.5;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Roughly `count` human-friendly tick values (steps of 1, 2 or 5 x 10^k)
    /// inside the domain, ascending.
    ///
    /// `count` is capped at one tick per range pixel and at `MAX_TICK_COUNT`.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let count = count.min(self.tick_limit());
        if self.is_degenerate() || count == 0 {
            return Vec::new();
        }
        let lo = self.domain_start.min(self.domain_end);
        let hi = self.domain_start.max(self.domain_end);
        let step = nice_step(lo, hi, count);
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }

        // Integer tick indices keep values free of accumulated float error.
        let (first, last, inverse) = if step < 1.0 {
            let inverse = (1.0 / step).round();
            ((lo * inverse).ceil(), (hi * inverse).floor(), Some(inverse))
        } else {
            ((lo / step).ceil(), (hi / step).floor(), None)
        };
        if last < first {
            return Vec::new();
        }
        let n = ((last - first) as usize + 1).min(MAX_TICK_COUNT * 3);
        (0..n)
            .map(|i| {
                let index = first + i as f64;
                match inverse {
                    Some(inverse) => index / inverse,
                    None => index * step,
                }
            })
            .collect()
    }

    fn tick_limit(self) -> usize {
        let pixels = (self.range_end - self.range_start).abs();
        if !pixels.is_finite() {
            return 1;
        }
        (pixels.floor() as usize).clamp(1, MAX_TICK_COUNT)
    }
}

pub(crate) fn nice_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo).abs() / count.max(1) as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= SQRT_50 {
        10.0
    } else if error >= SQRT_10 {
        5.0
    } else if error >= SQRT_2 {
        2.0
    } else {
        1.0
    };
    power * factor
}

/// Discrete categories mapped to evenly spaced bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(domain: Vec<String>, range: (f64, f64)) -> Self {
        Self {
            domain,
            range_start: range.0,
            range_end: range.1,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn padding(&self) -> (f64, f64) {
        (self.padding_inner, self.padding_outer)
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let slots = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (self.range_end - self.range_start) / slots
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    fn offset(&self) -> f64 {
        let n = self.domain.len() as f64;
        let used = self.step() * (n - self.padding_inner);
        self.range_start + (self.range_end - self.range_start - used) * 0.5
    }

    /// Left edge of the band at `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> f64 {
        self.offset() + self.step() * index as f64
    }

    #[must_use]
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth() * 0.5
    }

    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.domain.iter().position(|entry| entry == category)
    }
}

/// One domain value an axis can place a tick at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickValue {
    Number(f64),
    Category(String),
}

impl TickValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Category(_) => None,
        }
    }
}

/// Scale handed to an axis: continuous or banded.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Linear(LinearScale),
    Band(BandScale),
}

impl AxisScale {
    #[must_use]
    pub fn is_band(&self) -> bool {
        matches!(self, Self::Band(_))
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Linear(scale) => scale.is_degenerate(),
            Self::Band(scale) => scale.domain().is_empty(),
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.range(),
            Self::Band(scale) => scale.range(),
        }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        let (start, end) = self.range();
        (end - start).abs()
    }

    /// Numeric domain extent, `None` for band scales.
    #[must_use]
    pub fn extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::Linear(scale) => Some(scale.domain()),
            Self::Band(_) => None,
        }
    }

    /// Pixel position for a tick value, `None` when the value does not belong
    /// to the scale.
    #[must_use]
    pub fn position(&self, value: &TickValue) -> Option<f64> {
        match (self, value) {
            (Self::Linear(scale), TickValue::Number(number)) => Some(scale.map(*number)),
            (Self::Band(scale), TickValue::Category(category)) => {
                scale.index_of(category).map(|index| scale.center(index))
            }
            (Self::Band(scale), TickValue::Number(number)) => {
                let index = *number as usize;
                (number.fract() == 0.0 && *number >= 0.0 && index < scale.domain().len())
                    .then(|| scale.center(index))
            }
            (Self::Linear(_), TickValue::Category(_)) => None,
        }
    }

    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<TickValue> {
        match self {
            Self::Linear(scale) => scale.ticks(count).into_iter().map(TickValue::Number).collect(),
            Self::Band(scale) => scale
                .domain()
                .iter()
                .cloned()
                .map(TickValue::Category)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisScale, BandScale, LinearScale, MAX_TICK_COUNT, TickValue};

    #[test]
    fn linear_ticks_use_nice_steps() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0));
        assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn fractional_ticks_have_no_float_noise() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 500.0));
        let ticks = scale.ticks(10);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(ticks.len(), 11);
    }

    #[test]
    fn huge_tick_requests_are_bounded_by_the_range() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 400.0));
        let ticks = scale.ticks(10_000_000);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= 3 * 400);
        assert!(ticks.iter().all(|tick| (0.0..=100.0).contains(tick)));

        let wide = LinearScale::new((0.0, 1.0e9), (0.0, 1.0e9));
        assert!(wide.ticks(usize::MAX).len() <= 3 * MAX_TICK_COUNT);
    }

    #[test]
    fn degenerate_domain_yields_no_ticks_and_maps_to_mid_range() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert!(scale.ticks(5).is_empty());
        assert_eq!(scale.map(5.0), 50.0);
    }

    #[test]
    fn band_scale_centers_bands() {
        let scale = BandScale::new(vec!["a".into(), "b".into(), "c".into(), "d".into()], (0.0, 400.0));
        assert_eq!(scale.step(), 100.0);
        assert_eq!(scale.center(2), 250.0);

        let padded = scale.with_padding(0.2, 0.0);
        assert!((padded.bandwidth() - padded.step() * 0.8).abs() < 1e-9);
    }

    #[test]
    fn axis_scale_resolves_category_positions() {
        let scale = AxisScale::Band(BandScale::new(vec!["x".into(), "y".into()], (0.0, 100.0)));
        assert_eq!(scale.position(&TickValue::Category("y".into())), Some(75.0));
        assert_eq!(scale.position(&TickValue::Category("z".into())), None);
    }
}
