use crate::render::Color;

const CATEGORY10: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

/// Series color source. Constructed by the host and passed to each chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    pub text: Color,
    pub axis: Color,
    pub grid: Color,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = CATEGORY10
            .iter()
            .map(|&(r, g, b)| {
                Color::rgb(
                    f64::from(r) / 255.0,
                    f64::from(g) / 255.0,
                    f64::from(b) / 255.0,
                )
            })
            .collect();
        Self {
            colors,
            text: Color::rgb(0.2, 0.2, 0.2),
            axis: Color::rgb(0.6, 0.6, 0.6),
            grid: Color::rgba(0.0, 0.0, 0.0, 0.1),
        }
    }
}

impl Palette {
    /// Falls back to the default palette when `colors` is empty.
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self {
            colors,
            ..Self::default()
        }
    }

    /// Color for the series at `index`; a parseable per-series override wins.
    #[must_use]
    pub fn series_color(&self, index: usize, override_hex: Option<&str>) -> Color {
        override_hex
            .and_then(|hex| Color::from_hex(hex).ok())
            .unwrap_or_else(|| self.colors[index % self.colors.len()])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Palette;

    #[test]
    fn colors_cycle_and_overrides_win() {
        let palette = Palette::default();
        assert_eq!(palette.series_color(0, None), palette.series_color(10, None));
        assert_eq!(palette.series_color(3, Some("#000000")).to_hex(), "#000000");
        assert_eq!(
            palette.series_color(1, Some("not-a-color")),
            palette.series_color(1, None)
        );
    }
}
