use smallvec::SmallVec;

use crate::core::TextMeasurer;

use super::tick::Tick;

/// Flags and reports horizontal label collisions among ordinary visible ticks.
///
/// Ticks are compared with the neighbor `step` positions further along the
/// axis (2 when alternate ticks sit on a second stagger row). Min/max ticks
/// are exempt; they are handled by [`suppress_min_max_overlaps`].
pub(super) fn scan_collisions(ticks: &mut [Tick], gap: f64, step: usize) -> bool {
    for tick in ticks.iter_mut() {
        tick.overlaps_neighbor = false;
    }
    let mut eligible: Vec<usize> = ticks
        .iter()
        .enumerate()
        .filter(|(_, tick)| !tick.is_min_or_max && tick.is_visible())
        .map(|(index, _)| index)
        .collect();
    eligible.sort_by(|a, b| ticks[*a].pixel_position.total_cmp(&ticks[*b].pixel_position));

    let step = step.max(1);
    let mut found = false;
    for pair in eligible.windows(step + 1) {
        let (left, right) = (pair[0], pair[step]);
        if ticks[left].bounding_box.right + gap > ticks[right].bounding_box.left {
            ticks[left].overlaps_neighbor = true;
            ticks[right].overlaps_neighbor = true;
            found = true;
        }
    }
    found
}

/// Greedily packs words into lines no wider than `max_width`.
///
/// A single word wider than `max_width` still gets its own line.
pub(super) fn wrap_words(
    label: &str,
    max_width: f64,
    font_size_px: f64,
    measurer: &dyn TextMeasurer,
) -> SmallVec<[String; 2]> {
    let mut lines: SmallVec<[String; 2]> = SmallVec::new();
    let mut current = String::new();
    for word in label.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate, font_size_px).width <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Hides ordinary ticks whose label box overlaps a min/max label so the
/// extent label always wins.
pub(super) fn suppress_min_max_overlaps(ticks: &mut [Tick]) -> usize {
    let extents: Vec<_> = ticks
        .iter()
        .filter(|tick| tick.is_min_or_max)
        .map(|tick| tick.bounding_box)
        .collect();
    if extents.is_empty() {
        return 0;
    }
    let mut hidden = 0;
    for tick in ticks.iter_mut().filter(|tick| !tick.is_min_or_max && !tick.hidden) {
        if extents.iter().any(|extent| extent.overlaps(tick.bounding_box)) {
            tick.hidden = true;
            hidden += 1;
        }
    }
    hidden
}

#[cfg(test)]
mod tests {
    use super::wrap_words;
    use crate::core::{TextExtent, TextMeasurer};

    struct Monospace;

    impl TextMeasurer for Monospace {
        fn measure(&self, text: &str, font_size_px: f64) -> TextExtent {
            TextExtent::new(text.chars().count() as f64 * 5.0, font_size_px)
        }
    }

    #[test]
    fn packs_words_until_width_exceeded() {
        let lines = wrap_words("Closed Won Deals", 50.0, 12.0, &Monospace);
        assert_eq!(lines.as_slice(), ["Closed Won", "Deals"]);
    }

    #[test]
    fn overlong_word_keeps_own_line() {
        let lines = wrap_words("Negotiation Review", 30.0, 12.0, &Monospace);
        assert_eq!(lines.as_slice(), ["Negotiation", "Review"]);
    }

    #[test]
    fn empty_label_yields_single_empty_line() {
        assert_eq!(wrap_words("", 30.0, 12.0, &Monospace).len(), 1);
    }
}
