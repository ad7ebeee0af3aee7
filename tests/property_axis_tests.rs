use proptest::prelude::*;
use svgchart::axis::{AxisConfig, AxisLayoutEngine, AxisOrientation, AxisState, LabelStrategy};
use svgchart::core::{AxisScale, BandScale, TextExtent, TextMeasurer};

struct PerChar;

impl TextMeasurer for PerChar {
    fn measure(&self, text: &str, font_size_px: f64) -> TextExtent {
        TextExtent::new(text.chars().count() as f64 * 6.0, font_size_px)
    }
}

fn labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(
        prop::collection::vec("[a-z]{1,10}", 1..4).prop_map(|words| words.join(" ")),
        2..16,
    )
    .prop_map(|labels| labels.into_iter().collect())
}

fn layout(labels: Vec<String>, width: f64, config: AxisConfig) -> (AxisState, f64) {
    let scale = AxisScale::Band(BandScale::new(labels, (0.0, width)));
    let mut engine = AxisLayoutEngine::new(config);
    let state = engine.layout(&scale, &PerChar);
    (state, engine.config().label_gap_px)
}

fn clear_of_neighbors(state: &AxisState, gap: f64, step: usize) -> bool {
    let mut visible: Vec<_> = state
        .visible_ticks()
        .filter(|tick| !tick.is_min_or_max)
        .collect();
    visible.sort_by(|a, b| a.pixel_position.total_cmp(&b.pixel_position));
    visible
        .windows(step + 1)
        .all(|pair| pair[0].bounding_box.right + gap <= pair[step].bounding_box.left)
}

proptest! {
    #[test]
    fn successful_wrap_leaves_adjacent_labels_apart(
        labels in labels(),
        width in 100.0f64..1500.0
    ) {
        let config = AxisConfig::new(AxisOrientation::Bottom).with_wrap_ticks(true);
        let (state, gap) = layout(labels, width, config);

        prop_assert_eq!(state.wrap_succeeded, state.label_strategy == LabelStrategy::Wrap);
        prop_assert!(!state.stagger_succeeded);
        if !matches!(state.label_strategy, LabelStrategy::Rotate { .. }) {
            prop_assert!(clear_of_neighbors(&state, gap, 1));
        }
    }

    #[test]
    fn successful_stagger_leaves_same_row_labels_apart(
        labels in labels(),
        width in 100.0f64..1500.0
    ) {
        let config = AxisConfig::new(AxisOrientation::Bottom).with_stagger_ticks(true);
        let (state, gap) = layout(labels, width, config);

        prop_assert_eq!(state.stagger_succeeded, state.label_strategy == LabelStrategy::Stagger);
        prop_assert!(!state.wrap_succeeded);
        match state.label_strategy {
            LabelStrategy::Stagger => prop_assert!(clear_of_neighbors(&state, gap, 2)),
            LabelStrategy::None => prop_assert!(clear_of_neighbors(&state, gap, 1)),
            _ => {}
        }
    }
}
