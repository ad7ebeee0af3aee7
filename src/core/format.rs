use chrono::DateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::data::{XDataType, YDataType};
use crate::core::scale::TickValue;

/// Formatter applied to tick and tooltip values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueFormat {
    /// Grouped thousands; `None` precision keeps up to 6 significant decimals.
    Numeric { precision: Option<u8> },
    Currency { symbol: String, precision: u8 },
    /// `chrono` strftime pattern over epoch milliseconds.
    DateTime { pattern: String },
    Text,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::Numeric { precision: None }
    }
}

impl ValueFormat {
    #[must_use]
    pub fn for_x(data_type: XDataType) -> Self {
        match data_type {
            XDataType::Numeric => Self::default(),
            XDataType::Datetime => Self::DateTime {
                pattern: "%b %-d".to_owned(),
            },
            XDataType::Ordinal => Self::Text,
        }
    }

    #[must_use]
    pub fn for_y(data_type: YDataType) -> Self {
        match data_type {
            YDataType::Numeric => Self::default(),
            YDataType::Currency => Self::Currency {
                symbol: "$".to_owned(),
                precision: 0,
            },
        }
    }

    #[must_use]
    pub fn format_tick(&self, value: &TickValue) -> String {
        match value {
            TickValue::Number(number) => self.format(*number),
            TickValue::Category(category) => category.clone(),
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        match self {
            Self::Numeric { precision } => format_numeric(value, *precision),
            Self::Currency { symbol, precision } => format_currency(value, symbol, *precision),
            Self::DateTime { pattern } => DateTime::from_timestamp_millis(value as i64)
                .map(|time| time.format(pattern).to_string())
                .unwrap_or_else(|| format_numeric(value, None)),
            Self::Text => format!("{value}"),
        }
    }
}

fn format_numeric(value: f64, precision: Option<u8>) -> String {
    let text = match precision {
        Some(precision) => format!("{value:.prec$}", prec = usize::from(precision)),
        None => {
            let fixed = format!("{value:.6}");
            let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
            if trimmed == "-0" {
                "0".to_owned()
            } else {
                trimmed.to_owned()
            }
        }
    };
    group_thousands(&text)
}

fn format_currency(value: f64, symbol: &str, precision: u8) -> String {
    let Some(decimal) = Decimal::from_f64(value) else {
        return format!("{symbol}{}", format_numeric(value, Some(precision)));
    };
    let rounded = decimal.round_dp(u32::from(precision));
    let magnitude = format!("{:.prec$}", rounded.abs(), prec = usize::from(precision));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{}", group_thousands(&magnitude))
}

fn group_thousands(text: &str) -> String {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::ValueFormat;
    use crate::core::scale::TickValue;

    #[test]
    fn numeric_groups_thousands_and_trims_zeros() {
        let format = ValueFormat::default();
        assert_eq!(format.format(1_234_567.0), "1,234,567");
        assert_eq!(format.format(0.25), "0.25");
        assert_eq!(format.format(-1500.5), "-1,500.5");
    }

    #[test]
    fn currency_rounds_with_decimal_precision() {
        let format = ValueFormat::Currency {
            symbol: "$".to_owned(),
            precision: 2,
        };
        assert_eq!(format.format(1234.567), "$1,234.57");
        assert_eq!(format.format(-42.0), "-$42.00");
    }

    #[test]
    fn datetime_formats_epoch_millis() {
        let format = ValueFormat::DateTime {
            pattern: "%Y-%m-%d".to_owned(),
        };
        assert_eq!(format.format(86_400_000.0), "1970-01-02");
    }

    #[test]
    fn categories_pass_through_untouched() {
        let format = ValueFormat::default();
        assert_eq!(
            format.format_tick(&TickValue::Category("Q1 2024".to_owned())),
            "Q1 2024"
        );
    }
}
