use approx::assert_relative_eq;
use svgchart::axis::{
    AxisConfig, AxisLayoutEngine, AxisOrientation, AxisState, DEFAULT_ROTATE_TICKS_DEG,
    LabelStrategy, build_axis_group,
};
use svgchart::core::{
    AxisScale, BandScale, LinearScale, Palette, TextExtent, TextMeasurer, TickValue,
};
use svgchart::render::TextHAlign;

struct FixedExtent {
    width: f64,
    height: f64,
}

impl TextMeasurer for FixedExtent {
    fn measure(&self, _text: &str, _font_size_px: f64) -> TextExtent {
        TextExtent::new(self.width, self.height)
    }
}

fn categories(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Category {i}")).collect()
}

/// Visible ordinary ticks `step` apart keep the collision gap between their boxes.
fn assert_clear_of_neighbors(state: &AxisState, gap: f64, step: usize) {
    let mut visible: Vec<_> = state
        .visible_ticks()
        .filter(|tick| !tick.is_min_or_max)
        .collect();
    visible.sort_by(|a, b| a.pixel_position.total_cmp(&b.pixel_position));
    for pair in visible.windows(step + 1) {
        assert!(
            pair[0].bounding_box.right + gap <= pair[step].bounding_box.left,
            "`{}` crowds `{}`",
            pair[0].label,
            pair[step].label
        );
    }
}

#[test]
fn crowded_band_labels_fall_back_to_rotation() {
    let scale = AxisScale::Band(BandScale::new(categories(12), (0.0, 600.0)));
    let mut engine = AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Bottom));
    let measurer = FixedExtent {
        width: 80.0,
        height: 12.0,
    };

    let state = engine.layout(&scale, &measurer);

    assert_eq!(
        state.label_strategy,
        LabelStrategy::Rotate {
            degrees: DEFAULT_ROTATE_TICKS_DEG
        }
    );
    assert!(!state.wrap_succeeded);
    assert!(!state.stagger_succeeded);
    assert!(state.ticks.iter().all(|tick| tick.anchor == TextHAlign::Left));

    let radians = DEFAULT_ROTATE_TICKS_DEG.to_radians();
    let padding = engine.config().tick_padding;
    let expected = padding + 80.0 * radians.sin() + 12.0 * radians.cos();
    assert_relative_eq!(state.margin.bottom, expected, epsilon = 1e-9);
    assert!(state.margin.bottom > padding + 12.0);
}

#[test]
fn wrapping_is_tried_before_staggering() {
    let labels = vec![
        "North America".to_owned(),
        "South America".to_owned(),
        "Western Europe".to_owned(),
        "Eastern Europe".to_owned(),
    ];
    let scale = AxisScale::Band(BandScale::new(labels, (0.0, 240.0)));
    let config = AxisConfig::new(AxisOrientation::Bottom)
        .with_wrap_ticks(true)
        .with_stagger_ticks(true);
    let mut engine = AxisLayoutEngine::new(config);

    struct PerChar;
    impl TextMeasurer for PerChar {
        fn measure(&self, text: &str, font_size_px: f64) -> TextExtent {
            TextExtent::new(text.chars().count() as f64 * 6.0, font_size_px)
        }
    }

    let state = engine.layout(&scale, &PerChar);

    assert_eq!(state.label_strategy, LabelStrategy::Wrap);
    assert!(state.wrap_succeeded);
    assert!(state.ticks.iter().all(|tick| tick.lines.len() == 2));
    assert!(state.ticks.iter().all(|tick| tick.rotation_deg == 0.0));
    assert_clear_of_neighbors(&state, engine.config().label_gap_px, 1);
}

#[test]
fn staggering_resolves_moderate_overlap() {
    let scale = AxisScale::Band(BandScale::new(categories(6), (0.0, 300.0)));
    let config = AxisConfig::new(AxisOrientation::Bottom).with_stagger_ticks(true);
    let mut engine = AxisLayoutEngine::new(config);
    let measurer = FixedExtent {
        width: 70.0,
        height: 12.0,
    };

    let state = engine.layout(&scale, &measurer);

    assert_eq!(state.label_strategy, LabelStrategy::Stagger);
    assert!(state.stagger_succeeded);
    let offsets: Vec<f64> = state.ticks.iter().map(|tick| tick.row_offset).collect();
    assert_eq!(offsets, vec![0.0, 12.0, 0.0, 12.0, 0.0, 12.0]);
    assert_clear_of_neighbors(&state, engine.config().label_gap_px, 2);
}

#[test]
fn ticks_crowding_an_extent_label_are_hidden_not_removed() {
    // Nice ticks 20..80 plus extent labels at 0 and 85; 80 lands 29px from 85.
    let scale = AxisScale::Linear(LinearScale::new((0.0, 85.0), (0.0, 500.0)));
    let config = AxisConfig::new(AxisOrientation::Bottom);
    let mut engine = AxisLayoutEngine::new(config.clone());
    let measurer = FixedExtent {
        width: 40.0,
        height: 12.0,
    };

    let state = engine.layout(&scale, &measurer);

    assert_eq!(state.label_strategy, LabelStrategy::None);
    let values: Vec<f64> = state
        .ticks
        .iter()
        .filter_map(|tick| tick.value.as_number())
        .collect();
    assert_eq!(values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 85.0]);

    let hidden: Vec<f64> = state
        .ticks
        .iter()
        .filter(|tick| tick.hidden)
        .filter_map(|tick| tick.value.as_number())
        .collect();
    assert_eq!(hidden, vec![80.0]);
    assert!(state.visible_ticks().any(|tick| tick.is_min_or_max && tick.label == "85"));
    assert_eq!(state.visible_ticks().count(), 5);

    let group = build_axis_group(&state, &config, &Palette::default());
    let eighty = group
        .texts
        .iter()
        .find(|text| text.text == "80")
        .expect("hidden label is still drawn");
    assert_eq!(eighty.opacity, 0.0);
    assert_eq!(group.texts.len(), 6);
}

#[test]
fn degenerate_domain_yields_empty_axis() {
    let scale = AxisScale::Linear(LinearScale::new((5.0, 5.0), (0.0, 400.0)));
    let mut engine = AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Bottom));

    let state = engine.layout(&scale, &FixedExtent {
        width: 20.0,
        height: 12.0,
    });

    assert!(state.ticks.is_empty());
    assert_eq!(state.thickness, 0.0);
}

#[test]
fn single_explicit_tick_without_extents_is_the_only_visible_tick() {
    let scale = AxisScale::Linear(LinearScale::new((4.5, 5.5), (0.0, 400.0)));
    let mut engine = AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Bottom));
    engine.set_tick_values(Some(vec![TickValue::Number(5.0)]));
    engine.show_max_min(false);

    let state = engine.layout(&scale, &FixedExtent {
        width: 20.0,
        height: 12.0,
    });

    let visible: Vec<_> = state.visible_ticks().collect();
    assert_eq!(visible.len(), 1);
    assert_relative_eq!(visible[0].pixel_position, 200.0);
    assert!(!state.show_max_min);
}

#[test]
fn vertical_axis_reports_left_margin_and_overhang() {
    let scale = AxisScale::Linear(LinearScale::new((0.0, 100.0), (300.0, 0.0)));
    let mut engine = AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Left));
    let measurer = FixedExtent {
        width: 30.0,
        height: 12.0,
    };

    let state = engine.layout(&scale, &measurer);

    let padding = engine.config().tick_padding;
    assert_relative_eq!(state.margin.left, padding + 30.0);
    assert_relative_eq!(state.margin.top, 6.0);
    assert_relative_eq!(state.margin.bottom, 6.0);
    assert_eq!(state.label_strategy, LabelStrategy::None);
}

#[test]
fn axis_label_adds_to_thickness() {
    let scale = AxisScale::Linear(LinearScale::new((0.0, 100.0), (0.0, 500.0)));
    let measurer = FixedExtent {
        width: 20.0,
        height: 12.0,
    };
    let mut plain = AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Bottom));
    let mut labelled =
        AxisLayoutEngine::new(AxisConfig::new(AxisOrientation::Bottom).with_axis_label("Revenue"));

    let plain = plain.layout(&scale, &measurer);
    let labelled_state = labelled.layout(&scale, &measurer);

    let distance = labelled.config().axis_label_distance;
    assert_relative_eq!(labelled_state.thickness, plain.thickness + distance + 12.0);
    let label = labelled_state.axis_label.expect("axis label layout");
    assert_eq!(label.text, "Revenue");
    assert_relative_eq!(label.x, 250.0);
}
