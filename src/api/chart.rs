use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::{BoundingBox, ChartData, HeuristicTextMeasurer, Palette, TextMeasurer};
use crate::error::ChartResult;
use crate::interaction::{
    ChartEvent, ChartListener, ChartState, ElementEvent, EventDispatcher, HitPoint,
    HitTestScheduler, PointerInput,
};
use crate::legend::{LegendEntry, LegendLayoutEngine, LegendPosition, build_legend_groups};
use crate::render::{GroupKind, RenderFrame, RenderGroup, Renderer, TextHAlign, TextPrimitive};
use crate::scroll::{OverflowHandler, ScrollOverflow};

use super::config::ChartConfig;
use super::negotiation::NegotiationOutcome;

pub const NO_DATA_FONT_SIZE_PX: f64 = 14.0;
/// Pointer distance within which a point counts as hovered.
pub const HIT_RADIUS_PX: f64 = 24.0;
/// Share of the plot width a side-placed legend may take.
const LEGEND_SIDE_MAX_FRACTION: f64 = 0.4;

/// Inputs a plot model reads while laying itself out.
pub struct PlotContext<'a> {
    pub config: &'a ChartConfig,
    pub data: &'a ChartData,
    pub palette: &'a Palette,
    pub measurer: &'a dyn TextMeasurer,
    pub state: &'a ChartState,
    /// Space left for the plot and its axes after title and legend, in
    /// chart coordinates.
    pub area: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotOutput {
    /// Groups in paint order.
    pub groups: Vec<RenderGroup>,
    pub negotiation: Option<NegotiationOutcome>,
    /// Interactive points in chart coordinates.
    pub hit_points: Vec<HitPoint>,
}

/// Result of a scroll gesture: group translations to apply in lockstep.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPan {
    pub offset: f64,
    pub translations: Vec<(GroupKind, (f64, f64))>,
    pub shadow: Option<RenderGroup>,
    pub hit_points: Vec<HitPoint>,
}

/// Result of panning the open legend dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuPan {
    pub offset: f64,
    /// Motion the list could not absorb, for a parent to claim.
    pub overflow: Vec<ScrollOverflow>,
}

/// Chart-type specific drawing: scales, axes and marks for one plot area.
pub trait PlotModel {
    fn plot(&mut self, context: &PlotContext<'_>) -> PlotOutput;

    /// Drag or wheel input over the plot. `None` when the model does not
    /// scroll.
    fn pan(&mut self, _delta_x: f64, _delta_y: f64) -> Option<ScrollPan> {
        None
    }
}

/// One chart instance: owns its data, legend, listeners and renderer.
///
/// Every `render` call performs a full layout (title, legend, margin
/// negotiation, marks) and hands the resulting frame to the renderer.
pub struct Chart<M: PlotModel, R: Renderer> {
    model: M,
    renderer: R,
    config: ChartConfig,
    palette: Palette,
    measurer: Box<dyn TextMeasurer>,
    data: ChartData,
    legend: LegendLayoutEngine,
    dispatcher: EventDispatcher,
    hit_test: HitTestScheduler,
    state: ChartState,
    frame: Option<RenderFrame>,
    negotiation: Option<NegotiationOutcome>,
    clock_ms: u64,
    hovered: Option<HitPoint>,
    menu_overflow: Rc<RefCell<Vec<ScrollOverflow>>>,
}

impl<M: PlotModel + Default, R: Renderer> Chart<M, R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        Self::with_model(M::default(), renderer, config)
    }
}

impl<M: PlotModel, R: Renderer> Chart<M, R> {
    pub fn with_model(model: M, renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let palette = config.palette()?;
        let state = ChartState {
            stacked: config.stacked,
            interpolate: config.interpolate,
            ..ChartState::default()
        };
        Ok(Self {
            model,
            renderer,
            palette,
            measurer: Box::new(HeuristicTextMeasurer),
            data: ChartData::default(),
            legend: LegendLayoutEngine::new(config.legend.clone()),
            dispatcher: EventDispatcher::default(),
            hit_test: HitTestScheduler::new(config.hit_test_debounce_ms),
            state,
            frame: None,
            negotiation: None,
            clock_ms: 0,
            hovered: None,
            menu_overflow: Rc::new(RefCell::new(Vec::new())),
            config,
        })
    }

    /// Replaces the text measurement backend.
    #[must_use]
    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn set_data(&mut self, data: ChartData) {
        self.data = data;
        self.state.disabled = self.data.data.iter().map(|series| series.disabled).collect();
        self.legend
            .set_entries(LegendEntry::from_series(&self.data.data, &self.palette));
        self.hovered = None;
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Frame produced by the last `render`.
    #[must_use]
    pub fn frame(&self) -> Option<&RenderFrame> {
        self.frame.as_ref()
    }

    /// Margin negotiation of the last `render`; `None` for charts without
    /// axes and for the no-data placeholder.
    #[must_use]
    pub fn negotiation(&self) -> Option<&NegotiationOutcome> {
        self.negotiation.as_ref()
    }

    #[must_use]
    pub fn legend(&self) -> &LegendLayoutEngine {
        &self.legend
    }

    #[must_use]
    pub fn hit_test(&self) -> &HitTestScheduler {
        &self.hit_test
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn register_listener(&mut self, listener: Box<dyn ChartListener>) -> ChartResult<()> {
        self.dispatcher.register(listener)
    }

    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        self.dispatcher.unregister(listener_id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.dispatcher.listener_count()
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.compose();
        self.renderer.render(&frame)?;
        self.frame = Some(frame);
        Ok(())
    }

    fn compose(&mut self) -> RenderFrame {
        let viewport = self.config.viewport();
        let mut frame = RenderFrame::new(viewport);
        self.hovered = None;

        if self.data.is_empty_or_zero() {
            debug!("no plottable data, rendering placeholder only");
            self.negotiation = None;
            self.hit_test.request(self.clock_ms, Vec::new());
            frame.push_group(self.no_data_group());
            return frame;
        }

        let margin = self.config.margin;
        let gap = self.config.header_gap_px;
        let mut area = BoundingBox::new(
            margin.left,
            viewport.width - margin.right,
            margin.top,
            viewport.height - margin.bottom,
        );

        if let Some(title) = self.title() {
            let font = self.config.title_font_size_px;
            let extent = self.measurer.measure(&title, font);
            let mut group = RenderGroup::new(GroupKind::Title);
            group.texts.push(TextPrimitive::new(
                title,
                (area.left + area.right) * 0.5,
                area.top,
                font,
                self.palette.text,
                TextHAlign::Center,
            ));
            frame.push_group(group);
            area.top += extent.height + gap;
        }

        let mut menu_group = None;
        if self.config.show_legend && !self.data.data.is_empty() {
            let entries = LegendEntry::from_series(&self.data.data, &self.palette);
            self.legend.measure(entries, self.measurer.as_ref());
            let side = self.config.legend.position == LegendPosition::Middle;
            let max_width = if side {
                area.width() * LEGEND_SIDE_MAX_FRACTION
            } else {
                area.width()
            };
            let layout = self.legend.arrange(max_width);
            if !layout.is_empty() {
                let origin = if side {
                    let y = area.top + self.legend.origin_y(area.height());
                    if self.config.legend.rtl {
                        let origin = (area.left, y);
                        area.left += layout.total_width + gap;
                        origin
                    } else {
                        area.right -= layout.total_width + gap;
                        (area.right + gap, y)
                    }
                } else {
                    let origin = (area.left + self.legend.origin_x(area.width()), area.top);
                    area.top += layout.total_height + gap;
                    origin
                };

                let sink = Rc::clone(&self.menu_overflow);
                let handler: OverflowHandler =
                    Box::new(move |overflow| sink.borrow_mut().push(overflow));
                let container_height = viewport.height - margin.bottom - origin.1;
                let dropdown = self.legend.dropdown(container_height, Some(handler));
                let mut groups =
                    build_legend_groups(&self.legend, dropdown.as_ref(), origin, &self.palette);
                if groups.len() > 1 {
                    menu_group = groups.pop();
                }
                for group in groups {
                    frame.push_group(group);
                }
            }
        }

        let area = BoundingBox::new(
            area.left,
            area.right.max(area.left),
            area.top,
            area.bottom.max(area.top),
        );
        let context = PlotContext {
            config: &self.config,
            data: &self.data,
            palette: &self.palette,
            measurer: self.measurer.as_ref(),
            state: &self.state,
            area,
        };
        let output = self.model.plot(&context);
        trace!(
            groups = output.groups.len(),
            hit_points = output.hit_points.len(),
            "plot model composed"
        );

        for group in output.groups {
            frame.push_group(group);
        }
        if let Some(menu) = menu_group {
            frame.push_group(menu);
        }
        self.negotiation = output.negotiation;
        self.hit_test.request(self.clock_ms, output.hit_points);
        frame
    }

    fn title(&self) -> Option<String> {
        if !self.config.show_title {
            return None;
        }
        self.config
            .title
            .clone()
            .or_else(|| self.data.properties.title.clone())
            .filter(|title| !title.is_empty())
    }

    /// Centered placeholder. Positioned without measuring text.
    fn no_data_group(&self) -> RenderGroup {
        let viewport = self.config.viewport();
        let mut group = RenderGroup::new(GroupKind::NoData);
        group.texts.push(TextPrimitive::new(
            self.config.no_data_text.clone(),
            viewport.width * 0.5,
            (viewport.height - NO_DATA_FONT_SIZE_PX) * 0.5,
            NO_DATA_FONT_SIZE_PX,
            self.palette.text,
            TextHAlign::Center,
        ));
        group
    }

    /// Restores persisted interactive state and re-renders.
    pub fn apply_state(&mut self, state: ChartState) -> ChartResult<()> {
        for (series, &disabled) in self.data.data.iter_mut().zip(&state.disabled) {
            series.disabled = disabled;
        }
        self.legend.set_disabled(&state.disabled);
        self.state = ChartState {
            disabled: self.data.data.iter().map(|series| series.disabled).collect(),
            ..state
        };
        self.render()
    }

    /// Applies `ChangeState` requests and forwards every event to listeners.
    pub fn handle_event(&mut self, event: ChartEvent) -> ChartResult<()> {
        if let ChartEvent::ChangeState(state) = &event {
            self.apply_state(state.clone())?;
        }
        self.dispatcher.dispatch(&event);
        Ok(())
    }

    /// Toggles a series through its legend entry, notifies listeners and
    /// re-renders. Returns the entry's new disabled flag.
    pub fn legend_click(&mut self, series_index: usize) -> ChartResult<Option<bool>> {
        let Some(disabled) = self.legend.toggle(series_index) else {
            return Ok(None);
        };
        let states = self.legend.disabled_states();
        for (series, &disabled) in self.data.data.iter_mut().zip(&states) {
            series.disabled = disabled;
        }
        self.state.disabled = states;

        let key = self
            .data
            .data
            .get(series_index)
            .map(|series| series.key.clone())
            .unwrap_or_default();
        self.dispatcher.dispatch(&ChartEvent::LegendClick {
            series_index,
            key,
            disabled,
        });
        self.dispatcher
            .dispatch(&ChartEvent::StateChange(self.state.clone()));
        self.render()?;
        Ok(Some(disabled))
    }

    /// Opens or closes the collapsed legend dropdown and re-renders.
    pub fn toggle_legend_menu(&mut self) -> ChartResult<bool> {
        let open = self.legend.toggle_menu();
        self.render()?;
        Ok(open)
    }

    /// Pans the open legend dropdown. Overflow past either end of the list
    /// is returned for the host to hand to another scroller.
    pub fn pan_legend_menu(&mut self, delta_x: f64, delta_y: f64) -> ChartResult<MenuPan> {
        let offset = self.legend.pan_dropdown(delta_x, delta_y);
        let overflow: Vec<_> = self.menu_overflow.borrow_mut().drain(..).collect();
        self.render()?;
        Ok(MenuPan { offset, overflow })
    }

    /// Scrolls the plot when the model supports it, moving the plot and axis
    /// groups of the last frame together. Returns the new offset.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) -> ChartResult<Option<f64>> {
        let Some(pan) = self.model.pan(delta_x, delta_y) else {
            return Ok(None);
        };
        if let Some(frame) = self.frame.as_mut() {
            for group in &mut frame.groups {
                if let Some((_, translate)) =
                    pan.translations.iter().find(|(kind, _)| *kind == group.kind)
                {
                    group.translate = *translate;
                }
            }
            if let Some(shadow) = pan.shadow {
                if let Some(group) = frame
                    .groups
                    .iter_mut()
                    .find(|group| group.kind == GroupKind::ScrollShadow)
                {
                    *group = shadow;
                }
            }
            self.renderer.render(frame)?;
        }
        self.hit_test.request(self.clock_ms, pan.hit_points);
        Ok(Some(pan.offset))
    }

    /// Advances the host clock and installs a due hit-test rebuild.
    pub fn advance_clock(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
        self.hit_test.poll(self.clock_ms);
    }

    fn element_event(&self, hit: HitPoint, pointer: PointerInput) -> ElementEvent {
        let series = self.data.data.get(hit.series_index);
        ElementEvent {
            series_index: hit.series_index,
            series_key: series.map(|series| series.key.clone()).unwrap_or_default(),
            point_index: Some(hit.point_index),
            point: series.and_then(|series| series.values.get(hit.point_index).cloned()),
            pointer,
        }
    }

    /// Hover handling against the hit-test index. Emits mouseover/out,
    /// mousemove and tooltip events; returns the hovered point.
    pub fn pointer_move(&mut self, now_ms: u64, x: f64, y: f64) -> Option<HitPoint> {
        self.advance_clock(now_ms);
        let pointer = PointerInput::new(x, y);
        let hit = self.hit_test.nearest_point(x, y, Some(HIT_RADIUS_PX));
        let same = |a: HitPoint, b: HitPoint| {
            a.series_index == b.series_index && a.point_index == b.point_index
        };
        match (self.hovered, hit) {
            (Some(previous), Some(current)) if same(previous, current) => {
                let event = self.element_event(current, pointer);
                self.dispatcher.dispatch(&ChartEvent::ElementMousemove(event));
                self.dispatcher.dispatch(&ChartEvent::TooltipMove(pointer));
            }
            (previous, Some(current)) => {
                if let Some(previous) = previous {
                    let event = self.element_event(previous, pointer);
                    self.dispatcher.dispatch(&ChartEvent::ElementMouseout(event));
                }
                let event = self.element_event(current, pointer);
                self.dispatcher
                    .dispatch(&ChartEvent::ElementMouseover(event.clone()));
                self.dispatcher.dispatch(&ChartEvent::TooltipShow(event));
            }
            (Some(previous), None) => {
                let event = self.element_event(previous, pointer);
                self.dispatcher.dispatch(&ChartEvent::ElementMouseout(event));
                self.dispatcher.dispatch(&ChartEvent::TooltipHide);
            }
            (None, None) => {}
        }
        self.hovered = hit;
        hit
    }

    pub fn pointer_leave(&mut self) {
        if let Some(previous) = self.hovered.take() {
            let event = self.element_event(previous, PointerInput::default());
            self.dispatcher.dispatch(&ChartEvent::ElementMouseout(event));
            self.dispatcher.dispatch(&ChartEvent::TooltipHide);
        }
    }

    /// Emits `ElementClick` for a point under the pointer, else `ChartClick`.
    pub fn click(&mut self, x: f64, y: f64) -> Option<HitPoint> {
        let pointer = PointerInput::new(x, y);
        let hit = self.hit_test.nearest_point(x, y, Some(HIT_RADIUS_PX));
        match hit {
            Some(hit) => {
                let event = self.element_event(hit, pointer);
                self.dispatcher.dispatch(&ChartEvent::ElementClick(event));
            }
            None => self.dispatcher.dispatch(&ChartEvent::ChartClick(pointer)),
        }
        hit
    }
}
