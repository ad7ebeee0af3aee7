mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::{GroupKind, RenderFrame, RenderGroup};
pub use null_renderer::NullRenderer;
pub use primitives::{ArcPrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use svg_renderer::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from layout and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
