use std::cell::RefCell;
use std::rc::Rc;

use svgchart::core::{TextExtent, TextMeasurer};
use svgchart::legend::{
    LEGEND_ROW_HEIGHT_PX, LegendAlign, LegendConfig, LegendEntry, LegendLayoutEngine,
};
use svgchart::render::Color;
use svgchart::scroll::{OverflowHandler, ScrollEdge, ScrollOverflow};

/// Every label measures `width` pixels.
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

fn arranged(config: LegendConfig, count: usize, label_width: f64, max_width: f64) -> LegendLayoutEngine {
    let mut engine = LegendLayoutEngine::new(config);
    engine.measure(entries(count), &FixedWidth(label_width));
    engine.arrange(max_width);
    engine
}

#[test]
fn seven_equal_entries_settle_on_four_columns() {
    let mut engine = LegendLayoutEngine::new(LegendConfig::default());
    let widths = engine.measure(entries(7), &FixedWidth(40.0));
    assert_eq!(widths, vec![62.0; 7]);

    let layout = engine.arrange(300.0);

    assert_eq!(layout.columns, 4);
    assert_eq!(layout.rows, 2);
    assert_eq!(layout.total_width, 248.0);
    assert_eq!(layout.total_height, 2.0 * LEGEND_ROW_HEIGHT_PX);
    assert!(!layout.collapsed);
    let fifth = layout.entry_positions[&4];
    assert_eq!((fifth.x, fifth.y), (0.0, LEGEND_ROW_HEIGHT_PX));
    let fourth = layout.entry_positions[&3];
    assert_eq!((fourth.x, fourth.y), (186.0, 0.0));
}

#[test]
fn zero_entries_produce_an_empty_layout() {
    let engine = arranged(LegendConfig::default(), 0, 40.0, 300.0);
    let layout = engine.layout();

    assert!(layout.is_empty());
    assert_eq!(layout.rows, 0);
    assert_eq!(layout.total_width, 0.0);
    assert_eq!(layout.total_height, 0.0);
}

#[test]
fn single_entry_wider_than_container_still_gets_one_column() {
    for equal_columns in [true, false] {
        let config = LegendConfig::default().with_equal_columns(equal_columns);
        let engine = arranged(config, 1, 500.0, 300.0);
        let layout = engine.layout();

        assert_eq!(layout.columns, 1);
        assert_eq!(layout.rows, 1);
        assert_eq!(layout.total_width, 522.0);
    }
}

#[test]
fn flow_mode_packs_greedily() {
    let config = LegendConfig::default().with_equal_columns(false);
    let mut engine = LegendLayoutEngine::new(config);
    let mut list = entries(5);
    for (entry, width) in list.iter_mut().zip([100.0, 60.0, 120.0, 30.0, 90.0]) {
        entry.key = "x".repeat(width as usize / 10);
    }

    struct PerChar;
    impl TextMeasurer for PerChar {
        fn measure(&self, text: &str, font_size_px: f64) -> TextExtent {
            TextExtent::new(text.len() as f64 * 10.0, font_size_px)
        }
    }

    engine.measure(list, &PerChar);
    let layout = engine.arrange(250.0);

    // 122 + 82 fits, 142 wraps; 142 + 52 fits, 112 wraps.
    assert_eq!(layout.rows, 3);
    assert_eq!(layout.columns, 2);
    assert_eq!(layout.entry_positions[&1].x, 122.0);
    assert_eq!(layout.entry_positions[&2].x, 0.0);
    assert_eq!(layout.entry_positions[&3].x, 142.0);
    assert_eq!(layout.entry_positions[&4].y, 2.0 * LEGEND_ROW_HEIGHT_PX);
    assert_eq!(layout.total_width, 204.0);
}

#[test]
fn rtl_mirrors_columns_and_alignment() {
    let config = LegendConfig::default()
        .with_rtl(true)
        .with_align(LegendAlign::Right);
    let engine = arranged(config, 3, 40.0, 500.0);
    let layout = engine.layout();

    assert_eq!(layout.columns, 3);
    assert_eq!(layout.entry_positions[&0].x, 124.0);
    assert_eq!(layout.entry_positions[&2].x, 0.0);
    // Right resolves to left under RTL.
    assert_eq!(engine.origin_x(500.0), 0.0);
}

#[test]
fn center_alignment_splits_the_slack() {
    let config = LegendConfig::default().with_align(LegendAlign::Center);
    let engine = arranged(config, 2, 40.0, 500.0);

    assert_eq!(engine.origin_x(500.0), (500.0 - 124.0) * 0.5);
}

#[test]
fn too_many_rows_collapse_into_a_toggle_link() {
    let config = LegendConfig::default().with_rows_count(2);
    let engine = arranged(config, 12, 100.0, 300.0);
    let layout = engine.layout();

    assert!(layout.collapsed);
    assert_eq!(layout.rows, 12);
    assert_eq!(layout.columns, 1);
    assert_eq!(layout.total_height, LEGEND_ROW_HEIGHT_PX);
    assert_eq!(engine.toggle_label(), "Show legend");
}

#[test]
fn show_all_keeps_every_row_inline() {
    let config = LegendConfig::default().with_rows_count(2).with_show_all(true);
    let engine = arranged(config, 12, 100.0, 300.0);
    let layout = engine.layout();

    assert!(!layout.collapsed);
    assert_eq!(layout.rows, 6);
}

#[test]
fn open_dropdown_scrolls_and_hands_back_overflow() {
    let config = LegendConfig::default().with_rows_count(1).with_show_menu(true);
    let mut engine = arranged(config, 10, 60.0, 150.0);
    assert!(engine.layout().collapsed);
    assert!(engine.is_menu_open());
    assert_eq!(engine.toggle_label(), "Hide legend");

    let seen: Rc<RefCell<Vec<ScrollOverflow>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let handler: OverflowHandler = Box::new(move |overflow| sink.borrow_mut().push(overflow));

    // Ten rows of 20px against 100px left below the 20px toggle row.
    let dropdown = engine.dropdown(120.0, Some(handler)).expect("open dropdown");
    assert_eq!(dropdown.full_height, 200.0);
    assert_eq!(dropdown.height, 100.0);
    assert_eq!(dropdown.top, LEGEND_ROW_HEIGHT_PX);
    assert_eq!(dropdown.width, 82.0);

    assert_eq!(engine.pan_dropdown(0.0, -60.0), -60.0);
    assert!(seen.borrow().is_empty());
    assert_eq!(engine.pan_dropdown(0.0, -70.0), -100.0);
    assert_eq!(engine.pan_dropdown(0.0, 130.0), 0.0);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].edge, ScrollEdge::End);
    assert_eq!(seen[0].remaining, -30.0);
    assert_eq!(seen[1].edge, ScrollEdge::Start);
    assert_eq!(seen[1].remaining, 30.0);
}

#[test]
fn closing_the_menu_resets_its_scroll() {
    let config = LegendConfig::default().with_rows_count(1).with_show_menu(true);
    let mut engine = arranged(config, 10, 60.0, 150.0);
    engine.dropdown(120.0, None);
    engine.pan_dropdown(0.0, -40.0);

    assert!(!engine.toggle_menu());
    assert_eq!(engine.dropdown_offset(), 0.0);
    assert!(engine.dropdown(120.0, None).is_none());
}
