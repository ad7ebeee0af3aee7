use crate::core::Palette;
use crate::render::{Color, GroupKind, RectPrimitive, RenderGroup, TextHAlign, TextPrimitive};

use super::config::LegendAlign;
use super::engine::{LegendDropdown, LegendLayoutEngine};
use super::layout::{EntryPosition, LegendEntry};

const DISABLED_SWATCH_ALPHA: f64 = 0.2;
const DISABLED_LABEL_OPACITY: f64 = 0.5;
const MENU_BACKGROUND: Color = Color::rgba(1.0, 1.0, 1.0, 0.95);

/// Legend groups positioned at `origin` in chart coordinates: the inline
/// entries (or the toggle link when collapsed) and, when `dropdown` is
/// given, the clipped dropdown list.
#[must_use]
pub fn build_legend_groups(
    engine: &LegendLayoutEngine,
    dropdown: Option<&LegendDropdown>,
    origin: (f64, f64),
    palette: &Palette,
) -> Vec<RenderGroup> {
    let layout = engine.layout();
    let config = engine.config();
    let mut legend = RenderGroup::new(GroupKind::Legend).translated(origin.0, origin.1);
    if layout.is_empty() {
        return vec![legend];
    }

    if !layout.collapsed {
        for entry in engine.entries() {
            if let Some(position) = layout.entry_positions.get(&entry.series_index) {
                push_entry(&mut legend, engine, entry, *position, palette);
            }
        }
        return vec![legend];
    }

    let rtl = config.rtl;
    let (link_x, link_align) = if rtl {
        (layout.total_width, TextHAlign::Right)
    } else {
        (0.0, TextHAlign::Left)
    };
    legend.texts.push(TextPrimitive::new(
        engine.toggle_label(),
        link_x,
        (config.row_height_px - config.font_size_px) * 0.5,
        config.font_size_px,
        palette.text,
        link_align,
    ));

    let Some(dropdown) = dropdown else {
        return vec![legend];
    };
    let menu_x = match config.align.resolve(rtl) {
        LegendAlign::Right => layout.total_width - dropdown.width,
        LegendAlign::Left | LegendAlign::Center => 0.0,
    };
    let (dx, dy) = (origin.0 + menu_x, origin.1);
    let mut menu = RenderGroup::new(GroupKind::LegendMenu)
        .translated(dx, dy)
        .clipped(dropdown.clip.translate(dx, dy));
    menu.rects.push(RectPrimitive::new(
        0.0,
        dropdown.top,
        dropdown.width,
        dropdown.height,
        MENU_BACKGROUND,
    ));
    for entry in engine.entries() {
        if let Some(position) = layout.entry_positions.get(&entry.series_index) {
            let scrolled = EntryPosition {
                x: position.x,
                y: position.y + dropdown.offset,
            };
            push_entry(&mut menu, engine, entry, scrolled, palette);
        }
    }
    vec![legend, menu]
}

fn push_entry(
    group: &mut RenderGroup,
    engine: &LegendLayoutEngine,
    entry: &LegendEntry,
    position: EntryPosition,
    palette: &Palette,
) {
    let config = engine.config();
    let swatch = config.swatch_size_px;
    let half_gutter = config.gutter_px * 0.5;
    let swatch_y = position.y + (config.row_height_px - swatch) * 0.5;
    let text_y = position.y + (config.row_height_px - config.font_size_px) * 0.5;

    let (swatch_x, text_x, align) = if config.rtl {
        let right = position.x + entry.measured_width;
        (right - swatch, right - swatch - half_gutter, TextHAlign::Right)
    } else {
        (position.x, position.x + swatch + half_gutter, TextHAlign::Left)
    };

    let fill = if entry.disabled {
        entry.color.with_alpha(DISABLED_SWATCH_ALPHA)
    } else {
        entry.color
    };
    group
        .rects
        .push(RectPrimitive::new(swatch_x, swatch_y, swatch, swatch, fill));
    group.texts.push(
        TextPrimitive::new(
            entry.key.clone(),
            text_x,
            text_y,
            config.font_size_px,
            palette.text,
            align,
        )
        .with_opacity(if entry.disabled {
            DISABLED_LABEL_OPACITY
        } else {
            1.0
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::build_legend_groups;
    use crate::core::{HeuristicTextMeasurer, Palette};
    use crate::legend::{LegendConfig, LegendEntry, LegendLayoutEngine};
    use crate::render::{Color, GroupKind};

    #[test]
    fn disabled_entries_are_dimmed_not_removed() {
        let mut engine = LegendLayoutEngine::new(LegendConfig::default());
        engine.measure(
            vec![
                LegendEntry::new("Alpha", Color::rgb(1.0, 0.0, 0.0), 0),
                LegendEntry::new("Beta", Color::rgb(0.0, 0.0, 1.0), 1).with_disabled(true),
            ],
            &HeuristicTextMeasurer,
        );
        engine.arrange(400.0);

        let groups = build_legend_groups(&engine, None, (10.0, 5.0), &Palette::default());
        assert_eq!(groups.len(), 1);
        let legend = &groups[0];
        assert_eq!(legend.kind, GroupKind::Legend);
        assert_eq!(legend.translate, (10.0, 5.0));
        assert_eq!(legend.texts.len(), 2);
        assert_eq!(legend.texts[1].opacity, 0.5);
        assert!((legend.rects[1].fill.alpha - 0.2).abs() < 1e-12);
    }
}
