//! Viewport clipping and panning for content wider (or taller) than the plot.
//!
//! The engine owns one scroll offset in `[min_offset, 0]`. Motion that would
//! push past either bound is handed to an overflow handler so a parent (for
//! example a legend dropdown sharing the same drag gesture) can take it.

use std::fmt;

use tracing::trace;

use crate::core::{BoundingBox, MarginBox};
use crate::render::{Color, GroupKind, RectPrimitive, RenderGroup};

/// Depth of the edge shadow and the distance over which it fades in.
pub const SCROLL_SHADOW_SIZE_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEdge {
    Start,
    End,
}

/// Motion that could not be applied because the content hit an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOverflow {
    pub edge: ScrollEdge,
    /// Signed part of the requested delta left over after clamping.
    pub remaining: f64,
}

pub type OverflowHandler = Box<dyn FnMut(ScrollOverflow)>;

/// Viewport and content sizes the engine clamps against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDimensions {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Viewport position inside the chart.
    pub margin: MarginBox,
    /// Content length along the scroll direction.
    pub content_span: f64,
}

/// Edge shadow rectangle; opacity grows with the hidden distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollShadow {
    pub edge: ScrollEdge,
    pub rect: BoundingBox,
    pub opacity: f64,
}

pub struct ScrollEngine {
    vertical: bool,
    dimensions: ScrollDimensions,
    offset: f64,
    min_offset: f64,
    overflow_handler: Option<OverflowHandler>,
}

impl fmt::Debug for ScrollEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("vertical", &self.vertical)
            .field("dimensions", &self.dimensions)
            .field("offset", &self.offset)
            .field("min_offset", &self.min_offset)
            .field("has_overflow_handler", &self.overflow_handler.is_some())
            .finish()
    }
}

impl ScrollEngine {
    /// `vertical` means vertical bars, so content scrolls horizontally.
    #[must_use]
    pub fn new(vertical: bool) -> Self {
        Self {
            vertical,
            dimensions: ScrollDimensions::default(),
            offset: 0.0,
            min_offset: 0.0,
            overflow_handler: None,
        }
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: ScrollDimensions) -> Self {
        self.set_dimensions(dimensions);
        self
    }

    pub fn set_dimensions(&mut self, dimensions: ScrollDimensions) {
        self.dimensions = dimensions;
        self.recompute_bounds();
    }

    #[must_use]
    pub fn dimensions(&self) -> ScrollDimensions {
        self.dimensions
    }

    /// Re-derives clip and clamp bounds from the current dimensions, restores
    /// `offset` (clamped) and installs the handler for edge overflow.
    pub fn resize(&mut self, offset: f64, overflow_handler: Option<OverflowHandler>) {
        self.recompute_bounds();
        self.offset = self.clamp(offset);
        if overflow_handler.is_some() {
            self.overflow_handler = overflow_handler;
        }
    }

    fn recompute_bounds(&mut self) {
        let span = self.viewport_span() - self.dimensions.content_span;
        self.min_offset = if span.is_finite() { span.min(0.0) } else { 0.0 };
        self.offset = self.clamp(self.offset);
    }

    fn clamp(&self, offset: f64) -> f64 {
        if offset.is_finite() {
            offset.clamp(self.min_offset, 0.0)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    #[must_use]
    pub fn viewport_span(&self) -> f64 {
        if self.vertical {
            self.dimensions.width
        } else {
            self.dimensions.height
        }
    }

    /// False when the content fits and scrolling is disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.min_offset < 0.0
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn min_offset(&self) -> f64 {
        self.min_offset
    }

    /// Applies a direction-resolved delta and returns the clamped offset.
    pub fn pan(&mut self, delta: f64) -> f64 {
        if !delta.is_finite() {
            return self.offset;
        }
        let requested = self.offset + delta;
        let applied = self.clamp(requested);
        self.offset = applied;

        let overflow = if requested > 0.0 {
            Some(ScrollOverflow {
                edge: ScrollEdge::Start,
                remaining: requested,
            })
        } else if requested < self.min_offset {
            Some(ScrollOverflow {
                edge: ScrollEdge::End,
                remaining: requested - self.min_offset,
            })
        } else {
            None
        };
        if let Some(overflow) = overflow {
            trace!(?overflow, "scroll delta exceeded content edge");
            if let Some(handler) = self.overflow_handler.as_mut() {
                handler(overflow);
            }
        }
        applied
    }

    /// Drag or wheel input: horizontal motion in vertical-bar mode, vertical
    /// motion otherwise.
    pub fn pan_gesture(&mut self, delta_x: f64, delta_y: f64) -> f64 {
        let delta = if self.vertical { delta_x } else { delta_y };
        self.pan(delta)
    }

    /// Translation applied in lockstep to the bars group and the axis group.
    #[must_use]
    pub fn translate(&self) -> (f64, f64) {
        if self.vertical {
            (self.offset, 0.0)
        } else {
            (0.0, self.offset)
        }
    }

    /// Viewport rectangle in chart coordinates.
    #[must_use]
    pub fn clip_rect(&self) -> BoundingBox {
        let ScrollDimensions {
            width,
            height,
            margin,
            ..
        } = self.dimensions;
        BoundingBox::new(margin.left, margin.left + width, margin.top, margin.top + height)
    }

    #[must_use]
    pub fn shadows(&self) -> [ScrollShadow; 2] {
        let clip = self.clip_rect();
        let size = SCROLL_SHADOW_SIZE_PX;
        let start_opacity = (-self.offset / size).clamp(0.0, 1.0);
        let end_opacity = ((self.offset - self.min_offset) / size).clamp(0.0, 1.0);
        let (start_rect, end_rect) = if self.vertical {
            (
                BoundingBox::new(clip.left, clip.left + size, clip.top, clip.bottom),
                BoundingBox::new(clip.right - size, clip.right, clip.top, clip.bottom),
            )
        } else {
            (
                BoundingBox::new(clip.left, clip.right, clip.top, clip.top + size),
                BoundingBox::new(clip.left, clip.right, clip.bottom - size, clip.bottom),
            )
        };
        [
            ScrollShadow {
                edge: ScrollEdge::Start,
                rect: start_rect,
                opacity: start_opacity,
            },
            ScrollShadow {
                edge: ScrollEdge::End,
                rect: end_rect,
                opacity: end_opacity,
            },
        ]
    }

    #[must_use]
    pub fn shadow_group(&self, color: Color) -> RenderGroup {
        let mut group = RenderGroup::new(GroupKind::ScrollShadow);
        if !self.is_enabled() {
            return group;
        }
        for shadow in self.shadows() {
            let rect = shadow.rect;
            group.rects.push(RectPrimitive::new(
                rect.left,
                rect.top,
                rect.width().max(0.0),
                rect.height().max(0.0),
                color.with_alpha((color.alpha * shadow.opacity).clamp(0.0, 1.0)),
            ));
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{ScrollDimensions, ScrollEdge, ScrollEngine};
    use crate::core::MarginBox;

    fn engine(content_span: f64) -> ScrollEngine {
        ScrollEngine::new(true).with_dimensions(ScrollDimensions {
            width: 300.0,
            height: 200.0,
            margin: MarginBox::new(10.0, 0.0, 30.0, 40.0),
            content_span,
        })
    }

    #[test]
    fn fitting_content_disables_scroll() {
        let mut scroll = engine(250.0);
        assert!(!scroll.is_enabled());
        assert_eq!(scroll.pan(-50.0), 0.0);
    }

    #[test]
    fn shadows_fade_in_with_hidden_distance() {
        let mut scroll = engine(600.0);
        let [start, end] = scroll.shadows();
        assert_eq!(start.opacity, 0.0);
        assert_eq!(end.opacity, 1.0);

        scroll.pan(-6.0);
        let [start, _] = scroll.shadows();
        assert!((start.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn overflow_reports_leftover_motion() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut scroll = engine(400.0);
        scroll.resize(0.0, Some(Box::new(move |overflow| sink.borrow_mut().push(overflow))));

        assert_eq!(scroll.pan(-150.0), -100.0);
        assert_eq!(scroll.pan(130.0), 0.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].edge, ScrollEdge::End);
        assert_eq!(seen[0].remaining, -50.0);
        assert_eq!(seen[1].edge, ScrollEdge::Start);
        assert_eq!(seen[1].remaining, 30.0);
    }

    #[test]
    fn gesture_uses_axis_matching_orientation() {
        let mut scroll = engine(400.0);
        assert_eq!(scroll.pan_gesture(-20.0, -90.0), -20.0);
        assert_eq!(scroll.translate(), (-20.0, 0.0));
    }
}
