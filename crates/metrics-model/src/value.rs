//! Semantic value types, inference output, and coerced metric values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a column, inferred from its sampled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Boolean,
    Percentage,
    Currency,
    Date,
    Number,
    Text,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Percentage => "percentage",
            ValueType::Currency => "currency",
            ValueType::Date => "date",
            ValueType::Number => "number",
            ValueType::Text => "text",
        }
    }

    /// True for the pairs a number-typed column can still serve:
    /// plain numbers coerce cleanly into currency or percentage fields.
    pub fn is_compatible_with(&self, other: ValueType) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (*self, other),
            (ValueType::Number, ValueType::Currency)
                | (ValueType::Currency, ValueType::Number)
                | (ValueType::Number, ValueType::Percentage)
                | (ValueType::Percentage, ValueType::Number)
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Formatting observed while sampling a column, replayed during coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatHint {
    /// True when the sample used `,` as the decimal separator.
    pub decimal_comma: bool,
    /// The chrono pattern that parsed the sampled dates.
    pub date_pattern: Option<String>,
    /// Dominant currency symbol in the sample.
    pub currency_symbol: Option<char>,
}

/// Outcome of type inference for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredType {
    pub value_type: ValueType,
    /// Match fraction of the winning detector, in [0, 1].
    pub confidence: f64,
    pub format: FormatHint,
}

impl InferredType {
    pub fn text() -> Self {
        Self {
            value_type: ValueType::Text,
            confidence: 1.0,
            format: FormatHint::default(),
        }
    }
}

/// A coerced, typed cell value.
///
/// Percentages are stored as fractions: `"45%"` coerces to
/// `Percentage(0.45)` and renders back as `"45.0%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Boolean(bool),
    Percentage(f64),
    Currency(f64),
    Date(NaiveDate),
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            MetricValue::Boolean(_) => ValueType::Boolean,
            MetricValue::Percentage(_) => ValueType::Percentage,
            MetricValue::Currency(_) => ValueType::Currency,
            MetricValue::Date(_) => ValueType::Date,
            MetricValue::Number(_) => ValueType::Number,
            MetricValue::Text(_) => ValueType::Text,
        }
    }

    /// Numeric view used by validators and derived metrics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Percentage(v) | MetricValue::Currency(v) | MetricValue::Number(v) => {
                Some(*v)
            }
            _ => None,
        }
    }

    /// Renders the value back into display form.
    pub fn render(&self) -> String {
        match self {
            MetricValue::Boolean(v) => v.to_string(),
            MetricValue::Percentage(v) => format!("{:.1}%", v * 100.0),
            MetricValue::Currency(v) => format!("{v:.2}"),
            MetricValue::Date(v) => v.format("%Y-%m-%d").to_string(),
            MetricValue::Number(v) => format_number(*v),
            MetricValue::Text(v) => v.clone(),
        }
    }
}

/// Formats a number without trailing zeros ("10.50" -> "10.5", "10.0" -> "10").
fn format_number(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_round_trips_within_tolerance() {
        let value = MetricValue::Percentage(0.45);
        assert_eq!(value.render(), "45.0%");
    }

    #[test]
    fn number_render_trims_trailing_zeros() {
        assert_eq!(MetricValue::Number(10.5).render(), "10.5");
        assert_eq!(MetricValue::Number(10.0).render(), "10");
    }

    #[test]
    fn currency_renders_two_decimals() {
        assert_eq!(MetricValue::Currency(456.78).render(), "456.78");
        assert_eq!(MetricValue::Currency(1200.0).render(), "1200.00");
    }

    #[test]
    fn number_is_compatible_with_currency_and_percentage() {
        assert!(ValueType::Number.is_compatible_with(ValueType::Currency));
        assert!(ValueType::Number.is_compatible_with(ValueType::Percentage));
        assert!(!ValueType::Number.is_compatible_with(ValueType::Date));
        assert!(!ValueType::Text.is_compatible_with(ValueType::Number));
    }
}
