use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ChartResult;

/// X coordinate of a data point: numeric (or epoch millis) or a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Text(String),
}

impl Default for XValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl XValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(value) => format!("{value}"),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Numbers, numeric strings and `null` are all accepted; anything else reads as 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number.as_f64().unwrap_or(0.0),
        serde_json::Value::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Numbers and strings map to their variants; `null` and other shapes read as the default.
fn lenient_x<'de, D>(deserializer: D) -> Result<XValue, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number
            .as_f64()
            .map_or_else(XValue::default, XValue::Number),
        serde_json::Value::String(text) => XValue::Text(text),
        _ => XValue::default(),
    })
}

/// A non-array `values` reads as empty; elements that are not point objects are dropped.
fn lenient_points<'de, D>(deserializer: D) -> Result<Vec<Point>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(default, deserialize_with = "lenient_x")]
    pub x: XValue,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: XValue::Number(x),
            y,
        }
    }

    #[must_use]
    pub fn category(x: impl Into<String>, y: f64) -> Self {
        Self {
            x: XValue::Text(x.into()),
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_points")]
    pub values: Vec<Point>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl Series {
    #[must_use]
    pub fn new(key: impl Into<String>, values: Vec<Point>) -> Self {
        Self {
            key: key.into(),
            values,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().map(|point| point.y).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XDataType {
    #[default]
    Numeric,
    Datetime,
    Ordinal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YDataType {
    #[default]
    Numeric,
    Currency,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_data_type: XDataType,
    pub y_data_type: YDataType,
    pub groups: Vec<Group>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChartData {
    Bare(Vec<Series>),
    Wrapped {
        #[serde(default)]
        data: Vec<Series>,
        #[serde(default)]
        properties: ChartProperties,
    },
}

impl From<RawChartData> for ChartData {
    fn from(raw: RawChartData) -> Self {
        match raw {
            RawChartData::Bare(data) => Self {
                data,
                properties: ChartProperties::default(),
            },
            RawChartData::Wrapped { data, properties } => Self { data, properties },
        }
    }
}

/// Canonical chart input: a list of series plus optional properties.
///
/// Deserializes from either a bare series array or `{ data, properties }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawChartData")]
pub struct ChartData {
    pub data: Vec<Series>,
    pub properties: ChartProperties,
}

impl ChartData {
    #[must_use]
    pub fn new(data: Vec<Series>) -> Self {
        Self {
            data,
            properties: ChartProperties::default(),
        }
    }

    #[must_use]
    pub fn with_properties(mut self, properties: ChartProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when nothing can be drawn: no points at all, or every value is 0.
    #[must_use]
    pub fn is_empty_or_zero(&self) -> bool {
        !self
            .data
            .iter()
            .flat_map(|series| series.values.iter())
            .any(|point| point.y != 0.0 && point.y.is_finite())
    }

    pub fn enabled_series(&self) -> impl Iterator<Item = (usize, &Series)> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, series)| !series.disabled)
    }

    /// Category labels in first-seen order: explicit groups, else the x
    /// labels of all series.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        if !self.properties.groups.is_empty() {
            return self
                .properties
                .groups
                .iter()
                .map(|group| group.label.clone())
                .collect();
        }
        let mut labels: Vec<String> = Vec::new();
        for point in self.data.iter().flat_map(|series| series.values.iter()) {
            let label = point.x.label();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}
