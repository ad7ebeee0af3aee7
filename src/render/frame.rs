use serde::{Deserialize, Serialize};

use crate::core::{BoundingBox, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{ArcPrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// Wrapper groups a chart positions after layout, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Title,
    Legend,
    LegendMenu,
    Grid,
    Plot,
    XAxis,
    YAxis,
    ScrollShadow,
    NoData,
}

/// One translated (and optionally clipped) group of draw commands.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGroup {
    pub kind: GroupKind,
    pub translate: (f64, f64),
    pub clip: Option<BoundingBox>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub arcs: Vec<ArcPrimitive>,
}

impl RenderGroup {
    #[must_use]
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            translate: (0.0, 0.0),
            clip: None,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            arcs: Vec::new(),
        }
    }

    #[must_use]
    pub fn translated(mut self, dx: f64, dy: f64) -> Self {
        self.translate = (dx, dy);
        self
    }

    #[must_use]
    pub fn clipped(mut self, clip: BoundingBox) -> Self {
        self.clip = Some(clip);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty() && self.arcs.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.translate.0.is_finite() || !self.translate.1.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "{:?} group translation must be finite",
                self.kind
            )));
        }
        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for arc in &self.arcs {
            arc.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass, rebuilt on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub groups: Vec<RenderGroup>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: RenderGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn push_group(&mut self, group: RenderGroup) {
        self.groups.push(group);
    }

    #[must_use]
    pub fn group(&self, kind: GroupKind) -> Option<&RenderGroup> {
        self.groups.iter().find(|group| group.kind == kind)
    }

    #[must_use]
    pub fn has_group(&self, kind: GroupKind) -> bool {
        self.group(kind).is_some()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for group in &self.groups {
            group.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(RenderGroup::is_empty)
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.groups.iter().map(|group| group.texts.len()).sum()
    }
}
