use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::core::{BoundingBox, MarginBox, TextMeasurer};
use crate::scroll::{OverflowHandler, ScrollDimensions, ScrollEngine};

use super::config::{LegendAlign, LegendConfig, LegendPosition};
use super::layout::{
    EntryPosition, LegendEntry, LegendLayout, place_equal_columns, place_flow,
};

/// Geometry of the open dropdown list, relative to the legend origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendDropdown {
    pub width: f64,
    /// Visible height after clipping.
    pub height: f64,
    pub full_height: f64,
    pub top: f64,
    /// Current vertical scroll offset, in `[height - full_height, 0]`.
    pub offset: f64,
    pub clip: BoundingBox,
}

/// Arranges legend entries into rows and columns, or collapses them behind a
/// toggle link with a scrollable dropdown.
///
/// Widths come from `measure` and are trusted by every later `arrange`; call
/// `measure` again when labels change.
#[derive(Debug)]
pub struct LegendLayoutEngine {
    config: LegendConfig,
    entries: Vec<LegendEntry>,
    open_label_width: f64,
    close_label_width: f64,
    layout: LegendLayout,
    menu_open: bool,
    menu_scroll: ScrollEngine,
}

impl LegendLayoutEngine {
    #[must_use]
    pub fn new(config: LegendConfig) -> Self {
        let menu_open = config.show_menu;
        Self {
            config,
            entries: Vec::new(),
            open_label_width: 0.0,
            close_label_width: 0.0,
            layout: LegendLayout::empty(),
            menu_open,
            menu_scroll: ScrollEngine::new(false),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LegendConfig {
        &self.config
    }

    #[must_use]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Layout from the most recent `arrange` call.
    #[must_use]
    pub fn layout(&self) -> &LegendLayout {
        &self.layout
    }

    /// Replaces the entry set without measuring; widths stay as given.
    pub fn set_entries(&mut self, entries: Vec<LegendEntry>) {
        self.entries = entries;
        self.layout = LegendLayout::empty();
    }

    /// Replaces the entry set and measures each key once. Returns the entry
    /// footprints (label plus swatch and gutter) in entry order.
    pub fn measure(&mut self, entries: Vec<LegendEntry>, measurer: &dyn TextMeasurer) -> Vec<f64> {
        let font = self.config.font_size_px;
        let padding = self.config.entry_padding();
        self.entries = entries;
        for entry in &mut self.entries {
            let width = measurer.measure(&entry.key, font).width;
            let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
            entry.measured_width = width + padding;
        }
        self.open_label_width = measurer.measure(&self.config.open_label, font).width;
        self.close_label_width = measurer.measure(&self.config.close_label, font).width;
        self.layout = LegendLayout::empty();
        self.entries.iter().map(|entry| entry.measured_width).collect()
    }

    pub fn arrange(&mut self, max_width: f64) -> LegendLayout {
        let max_width = if max_width.is_finite() { max_width.max(0.0) } else { 0.0 };
        let row_height = self.config.row_height_px;
        let rtl = self.config.rtl;

        let mut layout = if self.config.equal_columns {
            place_equal_columns(&self.entries, max_width, row_height, rtl)
        } else {
            place_flow(&self.entries, max_width, row_height, rtl)
        };

        if layout.rows > self.config.rows_count && !self.config.show_all {
            debug!(
                rows = layout.rows,
                rows_count = self.config.rows_count,
                entries = self.entries.len(),
                "legend collapsed into dropdown"
            );
            layout = self.collapsed_layout();
        } else {
            trace!(
                rows = layout.rows,
                columns = layout.columns,
                total_width = layout.total_width,
                "legend arranged inline"
            );
        }

        self.layout = layout.clone();
        layout
    }

    /// Inline footprint is the toggle link; entries stack in one column below it.
    fn collapsed_layout(&self) -> LegendLayout {
        let row_height = self.config.row_height_px;
        let entry_positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                (
                    entry.series_index,
                    EntryPosition {
                        x: 0.0,
                        y: (index + 1) as f64 * row_height,
                    },
                )
            })
            .collect();
        LegendLayout {
            rows: self.entries.len(),
            columns: 1,
            entry_positions,
            total_width: self.toggle_label_width() + self.config.gutter_px,
            total_height: row_height,
            collapsed: true,
        }
    }

    #[must_use]
    pub fn toggle_label(&self) -> &str {
        if self.menu_open {
            &self.config.close_label
        } else {
            &self.config.open_label
        }
    }

    fn toggle_label_width(&self) -> f64 {
        self.open_label_width.max(self.close_label_width)
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Opens or closes the dropdown. Returns the new open state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        if !self.menu_open {
            self.menu_scroll.resize(0.0, None);
        }
        self.menu_open
    }

    /// Sizes the open dropdown against the container, installing
    /// `overflow_handler` for panning that runs past either end of the list.
    /// `None` unless the legend is collapsed and the menu is open.
    pub fn dropdown(
        &mut self,
        container_height: f64,
        overflow_handler: Option<OverflowHandler>,
    ) -> Option<LegendDropdown> {
        if !self.layout.collapsed || !self.menu_open {
            return None;
        }
        let width = self
            .entries
            .iter()
            .map(|entry| OrderedFloat(entry.measured_width))
            .max()
            .map_or(0.0, |width| width.0);
        let full_height = self.entries.len() as f64 * self.config.row_height_px;
        let top = self.layout.total_height;
        let available = if container_height.is_finite() {
            (container_height - top).max(0.0)
        } else {
            0.0
        };
        let height = available.min(full_height);

        self.menu_scroll.set_dimensions(ScrollDimensions {
            width,
            height,
            margin: MarginBox::new(top, 0.0, 0.0, 0.0),
            content_span: full_height,
        });
        let offset = self.menu_scroll.offset();
        self.menu_scroll.resize(offset, overflow_handler);

        Some(LegendDropdown {
            width,
            height,
            full_height,
            top,
            offset: self.menu_scroll.offset(),
            clip: self.menu_scroll.clip_rect(),
        })
    }

    /// Drag or wheel motion over the open dropdown. Returns the list offset.
    pub fn pan_dropdown(&mut self, delta_x: f64, delta_y: f64) -> f64 {
        if !self.menu_open {
            return 0.0;
        }
        self.menu_scroll.pan_gesture(delta_x, delta_y)
    }

    #[must_use]
    pub fn dropdown_offset(&self) -> f64 {
        self.menu_scroll.offset()
    }

    /// Flips `disabled` on the entry for `series_index`. When that would
    /// leave every entry disabled, all entries are re-enabled instead.
    /// Returns the entry's new state, or `None` for an unknown index.
    pub fn toggle(&mut self, series_index: usize) -> Option<bool> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.series_index == series_index)?;
        self.entries[position].disabled = !self.entries[position].disabled;
        if self.entries.iter().all(|entry| entry.disabled) {
            debug!(series_index, "all legend entries disabled, re-enabling");
            for entry in &mut self.entries {
                entry.disabled = false;
            }
        }
        Some(self.entries[position].disabled)
    }

    #[must_use]
    pub fn disabled_states(&self) -> Vec<bool> {
        self.entries.iter().map(|entry| entry.disabled).collect()
    }

    /// Restores persisted toggles; missing trailing values leave entries as-is.
    pub fn set_disabled(&mut self, disabled: &[bool]) {
        for (entry, &value) in self.entries.iter_mut().zip(disabled) {
            entry.disabled = value;
        }
    }

    /// Horizontal offset of the legend block inside `container_width`.
    #[must_use]
    pub fn origin_x(&self, container_width: f64) -> f64 {
        let slack = (container_width - self.layout.total_width).max(0.0);
        match self.config.align.resolve(self.config.rtl) {
            LegendAlign::Left => 0.0,
            LegendAlign::Right => slack,
            LegendAlign::Center => slack * 0.5,
        }
    }

    /// Vertical offset of the legend block inside `container_height`.
    #[must_use]
    pub fn origin_y(&self, container_height: f64) -> f64 {
        match self.config.position {
            LegendPosition::Start => 0.0,
            LegendPosition::Middle => {
                ((container_height - self.layout.total_height) * 0.5).max(0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LegendLayoutEngine;
    use crate::core::{TextExtent, TextMeasurer};
    use crate::legend::{LegendAlign, LegendConfig, LegendEntry};
    use crate::render::Color;

    struct FixedWidth(f64);

    impl TextMeasurer for FixedWidth {
        fn measure(&self, _text: &str, font_size_px: f64) -> TextExtent {
            TextExtent::new(self.0, font_size_px)
        }
    }

    fn entries(count: usize) -> Vec<LegendEntry> {
        (0..count)
            .map(|index| LegendEntry::new(format!("Series {index}"), Color::rgb(0.2, 0.4, 0.6), index))
            .collect()
    }

    #[test]
    fn toggle_re_enables_everything_instead_of_disabling_the_last_entry() {
        let mut engine = LegendLayoutEngine::new(LegendConfig::default());
        engine.measure(entries(2), &FixedWidth(40.0));

        assert_eq!(engine.toggle(0), Some(true));
        assert_eq!(engine.toggle(1), Some(false));
        assert_eq!(engine.disabled_states(), vec![false, false]);
        assert_eq!(engine.toggle(7), None);
    }

    #[test]
    fn alignment_swaps_under_rtl() {
        let config = LegendConfig::default().with_align(LegendAlign::Left).with_rtl(true);
        let mut engine = LegendLayoutEngine::new(config);
        engine.measure(entries(2), &FixedWidth(40.0));
        let layout = engine.arrange(500.0);
        assert_eq!(layout.total_width, 124.0);
        assert_eq!(engine.origin_x(500.0), 376.0);
    }

    #[test]
    fn closed_menu_has_no_dropdown() {
        let mut engine = LegendLayoutEngine::new(LegendConfig::default().with_rows_count(1));
        engine.measure(entries(6), &FixedWidth(80.0));
        let layout = engine.arrange(200.0);
        assert!(layout.collapsed);
        assert!(engine.dropdown(400.0, None).is_none());
        assert_eq!(engine.toggle_label(), "Show legend");

        assert!(engine.toggle_menu());
        assert_eq!(engine.toggle_label(), "Hide legend");
        assert!(engine.dropdown(400.0, None).is_some());
    }
}
