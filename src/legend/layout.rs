use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Palette, Series};
use crate::render::Color;

/// One swatch + label in the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub key: String,
    pub color: Color,
    pub series_index: usize,
    pub disabled: bool,
    /// Label width plus swatch and gutter; zero until measured.
    pub measured_width: f64,
}

impl LegendEntry {
    #[must_use]
    pub fn new(key: impl Into<String>, color: Color, series_index: usize) -> Self {
        Self {
            key: key.into(),
            color,
            series_index,
            disabled: false,
            measured_width: 0.0,
        }
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// One entry per series, colored through `palette`.
    #[must_use]
    pub fn from_series(series: &[Series], palette: &Palette) -> Vec<Self> {
        series
            .iter()
            .enumerate()
            .map(|(index, series)| {
                Self::new(
                    series.key.clone(),
                    palette.series_color(index, series.color.as_deref()),
                    index,
                )
                .with_disabled(series.disabled)
            })
            .collect()
    }
}

/// Top-left corner of an entry box, relative to the legend origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EntryPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegendLayout {
    pub rows: usize,
    pub columns: usize,
    /// Keyed by series index, in entry order.
    pub entry_positions: IndexMap<usize, EntryPosition>,
    pub total_width: f64,
    pub total_height: f64,
    pub collapsed: bool,
}

impl LegendLayout {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Largest column count whose per-column maxima sum within `max_width`.
/// Falls back to one column when even that does not fit.
pub(super) fn equal_columns(widths: &[f64], max_width: f64) -> (usize, Vec<f64>) {
    if widths.is_empty() {
        return (0, Vec::new());
    }
    for columns in (1..=widths.len()).rev() {
        let column_widths = column_maxima(widths, columns);
        if column_widths.iter().sum::<f64>() <= max_width {
            return (columns, column_widths);
        }
    }
    (1, column_maxima(widths, 1))
}

fn column_maxima(widths: &[f64], columns: usize) -> Vec<f64> {
    (0..columns)
        .map(|column| {
            widths
                .iter()
                .skip(column)
                .step_by(columns)
                .copied()
                .map(OrderedFloat)
                .max()
                .map_or(0.0, |width| width.0)
        })
        .collect()
}

pub(super) fn place_equal_columns(
    entries: &[LegendEntry],
    max_width: f64,
    row_height: f64,
    rtl: bool,
) -> LegendLayout {
    let widths: Vec<f64> = entries.iter().map(|entry| entry.measured_width).collect();
    let (columns, column_widths) = equal_columns(&widths, max_width);
    if columns == 0 {
        return LegendLayout::empty();
    }
    let rows = entries.len().div_ceil(columns);
    let total_width: f64 = column_widths.iter().sum();

    let mut offsets = Vec::with_capacity(columns);
    let mut cursor = 0.0;
    for width in &column_widths {
        offsets.push(cursor);
        cursor += width;
    }

    let entry_positions = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let (row, column) = (index / columns, index % columns);
            let x = if rtl {
                total_width - offsets[column] - column_widths[column]
            } else {
                offsets[column]
            };
            (
                entry.series_index,
                EntryPosition {
                    x,
                    y: row as f64 * row_height,
                },
            )
        })
        .collect();

    LegendLayout {
        rows,
        columns,
        entry_positions,
        total_width,
        total_height: rows as f64 * row_height,
        collapsed: false,
    }
}

pub(super) fn place_flow(
    entries: &[LegendEntry],
    max_width: f64,
    row_height: f64,
    rtl: bool,
) -> LegendLayout {
    if entries.is_empty() {
        return LegendLayout::empty();
    }
    let mut placed = Vec::with_capacity(entries.len());
    let mut row = 0usize;
    let mut cursor = 0.0;
    let mut in_row = 0usize;
    let mut columns = 0usize;
    let mut total_width: f64 = 0.0;

    for entry in entries {
        let width = entry.measured_width;
        if in_row > 0 && cursor + width > max_width {
            row += 1;
            cursor = 0.0;
            in_row = 0;
        }
        placed.push((entry.series_index, cursor, width, row));
        cursor += width;
        in_row += 1;
        columns = columns.max(in_row);
        total_width = total_width.max(cursor);
    }

    let entry_positions = placed
        .into_iter()
        .map(|(series_index, x, width, row)| {
            let x = if rtl { total_width - x - width } else { x };
            (
                series_index,
                EntryPosition {
                    x,
                    y: row as f64 * row_height,
                },
            )
        })
        .collect();

    let rows = row + 1;
    LegendLayout {
        rows,
        columns,
        entry_positions,
        total_width,
        total_height: rows as f64 * row_height,
        collapsed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::{LegendEntry, equal_columns, place_flow};
    use crate::render::Color;

    fn entries(widths: &[f64]) -> Vec<LegendEntry> {
        widths
            .iter()
            .enumerate()
            .map(|(index, &width)| {
                let mut entry = LegendEntry::new(format!("S{index}"), Color::rgb(0.0, 0.0, 0.0), index);
                entry.measured_width = width;
                entry
            })
            .collect()
    }

    #[test]
    fn equal_columns_uses_widest_member_per_column() {
        let (columns, widths) = equal_columns(&[30.0, 80.0, 50.0, 40.0, 20.0], 130.0);
        assert_eq!(columns, 2);
        assert_eq!(widths, vec![50.0, 80.0]);
    }

    #[test]
    fn flow_wraps_when_the_next_entry_overflows() {
        let layout = place_flow(&entries(&[60.0, 60.0, 60.0, 30.0]), 130.0, 20.0, false);
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.columns, 2);
        assert_eq!(layout.total_width, 120.0);
        assert_eq!(layout.entry_positions[&2].x, 0.0);
        assert_eq!(layout.entry_positions[&3].x, 60.0);
        assert_eq!(layout.entry_positions[&3].y, 20.0);
    }

    #[test]
    fn flow_mirrors_rows_under_rtl() {
        let layout = place_flow(&entries(&[50.0, 30.0]), 200.0, 20.0, true);
        assert_eq!(layout.entry_positions[&0].x, 30.0);
        assert_eq!(layout.entry_positions[&1].x, 0.0);
    }
}
