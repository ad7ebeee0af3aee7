//! Adapter from tabular rows to the canonical series shape.

use serde_json::Value;

use crate::core::data::{ChartData, ChartProperties, Group, Point, Series, XDataType, XValue};
use crate::error::ChartResult;

fn cell_to_x(cell: &Value) -> XValue {
    match cell {
        Value::Number(number) => XValue::Number(number.as_f64().unwrap_or(0.0)),
        Value::String(text) => XValue::Text(text.clone()),
        Value::Null => XValue::Text(String::new()),
        other => XValue::Text(other.to_string()),
    }
}

fn cell_to_y(cell: Option<&Value>) -> f64 {
    match cell {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Converts CSV-like rows into series.
///
/// The first row is the header: its first cell names the x column, every other
/// cell becomes a series key. Each following row contributes one point per
/// series. Short rows read missing cells as 0; an empty table yields no data.
#[must_use]
pub fn from_rows(rows: &[Vec<Value>]) -> ChartData {
    let Some((header, body)) = rows.split_first() else {
        return ChartData::default();
    };

    let mut series: Vec<Series> = header
        .iter()
        .skip(1)
        .map(|cell| match cell {
            Value::String(text) => Series::new(text.clone(), Vec::with_capacity(body.len())),
            other => Series::new(other.to_string(), Vec::with_capacity(body.len())),
        })
        .collect();

    let mut groups = Vec::with_capacity(body.len());
    let mut all_numeric = true;
    for row in body {
        let x = row.first().map(cell_to_x).unwrap_or_default();
        all_numeric &= matches!(x, XValue::Number(_));
        groups.push(Group { label: x.label() });
        for (column, entry) in series.iter_mut().enumerate() {
            entry.values.push(Point {
                x: x.clone(),
                y: cell_to_y(row.get(column + 1)),
            });
        }
    }

    let x_data_type = if all_numeric {
        XDataType::Numeric
    } else {
        XDataType::Ordinal
    };
    ChartData::new(series).with_properties(ChartProperties {
        x_data_type,
        groups: if all_numeric { Vec::new() } else { groups },
        ..ChartProperties::default()
    })
}

/// Parses a JSON array of arrays and converts it with [`from_rows`].
pub fn from_json_rows(json: &str) -> ChartResult<ChartData> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(json)?;
    Ok(from_rows(&rows))
}

#[cfg(test)]
mod tests {
    use super::from_json_rows;
    use crate::core::data::{XDataType, XValue};

    #[test]
    fn header_row_becomes_series_keys() {
        let data = from_json_rows(r#"[["Quarter","Won","Lost"],["Q1",10,"4"],["Q2",12]]"#)
            .expect("rows parse");
        assert_eq!(data.data.len(), 2);
        assert_eq!(data.data[0].key, "Won");
        assert_eq!(data.data[1].values[0].y, 4.0);
        assert_eq!(data.data[1].values[1].y, 0.0);
        assert_eq!(data.data[0].values[1].x, XValue::Text("Q2".to_owned()));
        assert_eq!(data.properties.x_data_type, XDataType::Ordinal);
        assert_eq!(data.categories(), vec!["Q1".to_owned(), "Q2".to_owned()]);
    }

    #[test]
    fn empty_table_has_no_series() {
        let data = from_json_rows("[]").expect("empty parse");
        assert!(data.data.is_empty());
        assert!(data.is_empty_or_zero());
    }
}
