use serde::{Deserialize, Serialize};

use crate::core::Point;

use super::state::ChartState;

/// Raw pointer coordinates of the host input event, in chart space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
}

impl PointerInput {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Originating data point of an element event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementEvent {
    pub series_index: usize,
    pub series_key: String,
    pub point_index: Option<usize>,
    pub point: Option<Point>,
    pub pointer: PointerInput,
}

/// Everything a chart publishes to its listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartEvent {
    ElementClick(ElementEvent),
    ElementMouseover(ElementEvent),
    ElementMouseout(ElementEvent),
    ElementMousemove(ElementEvent),
    LegendClick {
        series_index: usize,
        key: String,
        disabled: bool,
    },
    /// Emitted after interaction changed the persisted state.
    StateChange(ChartState),
    /// Requests that a chart restore `ChartState`.
    ChangeState(ChartState),
    TooltipShow(ElementEvent),
    TooltipHide,
    TooltipMove(PointerInput),
    ChartClick(PointerInput),
}

impl ChartEvent {
    /// Stable event name, matching the camelCase `type` tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ElementClick(_) => "elementClick",
            Self::ElementMouseover(_) => "elementMouseover",
            Self::ElementMouseout(_) => "elementMouseout",
            Self::ElementMousemove(_) => "elementMousemove",
            Self::LegendClick { .. } => "legendClick",
            Self::StateChange(_) => "stateChange",
            Self::ChangeState(_) => "changeState",
            Self::TooltipShow(_) => "tooltipShow",
            Self::TooltipHide => "tooltipHide",
            Self::TooltipMove(_) => "tooltipMove",
            Self::ChartClick(_) => "chartClick",
        }
    }
}

/// Listener hook. Listeners observe events; they never mutate chart internals.
pub trait ChartListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent);
}
