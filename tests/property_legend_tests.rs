use proptest::prelude::*;
use svgchart::core::{TextExtent, TextMeasurer};
use svgchart::legend::{LegendConfig, LegendEntry, LegendLayoutEngine};
use svgchart::render::Color;

/// Label width is looked up from the entry key, which encodes it.
struct KeyWidth;

impl TextMeasurer for KeyWidth {
    fn measure(&self, text: &str, font_size_px: f64) -> TextExtent {
        TextExtent::new(text.parse().unwrap_or(40.0), font_size_px)
    }
}

fn engine(widths: &[u16], equal_columns: bool, rtl: bool) -> LegendLayoutEngine {
    let config = LegendConfig::default()
        .with_equal_columns(equal_columns)
        .with_rtl(rtl)
        .with_show_all(true);
    let entries = widths
        .iter()
        .enumerate()
        .map(|(index, width)| LegendEntry::new(width.to_string(), Color::rgb(0.0, 0.0, 0.0), index))
        .collect();
    let mut engine = LegendLayoutEngine::new(config);
    engine.measure(entries, &KeyWidth);
    engine
}

proptest! {
    #[test]
    fn arranged_legend_fits_unless_one_entry_is_too_wide(
        widths in prop::collection::vec(1u16..300, 1..24),
        max_width in 50.0f64..1200.0,
        equal_columns in any::<bool>(),
        rtl in any::<bool>()
    ) {
        let mut engine = engine(&widths, equal_columns, rtl);
        let layout = engine.arrange(max_width);
        let widest = widths.iter().map(|w| f64::from(*w) + 22.0).fold(0.0, f64::max);

        prop_assert_eq!(layout.entry_positions.len(), widths.len());
        prop_assert!(layout.rows >= 1);
        prop_assert!(layout.columns >= 1);
        prop_assert!(layout.rows * layout.columns >= widths.len());
        if widest <= max_width {
            prop_assert!(layout.total_width <= max_width + 1e-9);
        } else if equal_columns {
            prop_assert_eq!(layout.columns, 1);
        }
        for (index, position) in &layout.entry_positions {
            let width = f64::from(widths[*index]) + 22.0;
            prop_assert!(position.x >= -1e-9);
            prop_assert!(position.x + width <= layout.total_width + 1e-9);
            prop_assert!(position.y < layout.total_height);
        }
    }

    #[test]
    fn equal_columns_share_x_per_column(
        widths in prop::collection::vec(1u16..200, 2..20),
        max_width in 100.0f64..900.0
    ) {
        let mut engine = engine(&widths, true, false);
        let layout = engine.arrange(max_width);
        let columns = layout.columns;

        for (index, position) in &layout.entry_positions {
            let first_in_column = layout.entry_positions[&(index % columns)];
            prop_assert_eq!(position.x, first_in_column.x);
            prop_assert_eq!(position.y, (index / columns) as f64 * 20.0);
        }
    }
}
