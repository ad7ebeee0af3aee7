use serde::{Deserialize, Serialize};

/// Container size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Pixel insets on each edge of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginBox {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl MarginBox {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Componentwise maximum. Negotiation passes only ever grow a margin.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
            left: self.left.max(other.left),
        }
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    pub(crate) fn is_finite(self) -> bool {
        self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
    }
}

/// Axis-aligned box in pixel space, `top < bottom` in screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    #[must_use]
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut bbox = Self::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for &(x, y) in points {
            bbox.left = bbox.left.min(x);
            bbox.right = bbox.right.max(x);
            bbox.top = bbox.top.min(y);
            bbox.bottom = bbox.bottom.max(y);
        }
        if points.is_empty() {
            Self::default()
        } else {
            bbox
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.left + dx,
            self.right + dx,
            self.top + dy,
            self.bottom + dy,
        )
    }
}

/// Plot-area dimensions derived on every negotiation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotGeometry {
    pub available_width: f64,
    pub available_height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub inner_margin: MarginBox,
}

impl PlotGeometry {
    #[must_use]
    pub fn new(available_width: f64, available_height: f64, inner_margin: MarginBox) -> Self {
        Self {
            available_width,
            available_height,
            inner_width: (available_width - inner_margin.horizontal()).max(0.0),
            inner_height: (available_height - inner_margin.vertical()).max(0.0),
            inner_margin,
        }
    }

    #[must_use]
    pub fn with_inner_margin(self, inner_margin: MarginBox) -> Self {
        Self::new(self.available_width, self.available_height, inner_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundingBox, MarginBox, PlotGeometry};

    #[test]
    fn margin_max_is_componentwise() {
        let a = MarginBox::new(1.0, 5.0, 2.0, 9.0);
        let b = MarginBox::new(3.0, 4.0, 8.0, 0.0);
        assert_eq!(a.max(b), MarginBox::new(3.0, 5.0, 8.0, 9.0));
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        let b = BoundingBox::new(10.0, 20.0, 0.0, 10.0);
        assert!(!a.overlaps(b));
        assert!(a.overlaps(b.translate(-0.5, 0.0)));
    }

    #[test]
    fn geometry_never_goes_negative() {
        let geometry = PlotGeometry::new(40.0, 30.0, MarginBox::uniform(25.0));
        assert_eq!(geometry.inner_width, 0.0);
        assert_eq!(geometry.inner_height, 0.0);
    }
}
