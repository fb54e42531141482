//! Per-cell coercion.

use std::fmt;

use metrics_infer::parse::{parse_currency, parse_date_with_hint, parse_number, parse_percentage};
use metrics_model::{FormatHint, MetricValue, ValueType};

/// A cell that could not be coerced to its field's expected type.
///
/// The failure is recorded on the row; the field stays absent. A
/// missing value is never replaced with a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceError {
    pub raw: String,
    pub expected: ValueType,
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot coerce {:?} to {}", self.raw, self.expected)
    }
}

impl std::error::Error for CoerceError {}

/// Coerces one raw cell to the expected type, honoring the column's
/// recorded format.
///
/// Percentages normalize to fractions (`"45%"` becomes `0.45`); a bare
/// number in a percentage field reads as percent points. Currency
/// accepts symbol-tagged and plain amounts alike.
pub fn coerce(
    raw: &str,
    expected: ValueType,
    hint: &FormatHint,
) -> Result<MetricValue, CoerceError> {
    let trimmed = raw.trim();
    let fail = || CoerceError {
        raw: raw.to_string(),
        expected,
    };

    match expected {
        ValueType::Text => Ok(MetricValue::Text(trimmed.to_string())),
        ValueType::Boolean => match trimmed.to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(MetricValue::Boolean(true)),
            "false" | "no" | "n" | "0" => Ok(MetricValue::Boolean(false)),
            _ => Err(fail()),
        },
        ValueType::Number => numeric_part(trimmed, hint).map(MetricValue::Number).ok_or_else(fail),
        ValueType::Currency => numeric_part(trimmed, hint)
            .map(MetricValue::Currency)
            .ok_or_else(fail),
        ValueType::Percentage => {
            let points = match parse_percentage(trimmed) {
                Some(parsed) => Some(parsed.value),
                None => numeric_part(trimmed, hint),
            };
            points
                .map(|p| MetricValue::Percentage(p / 100.0))
                .ok_or_else(fail)
        }
        ValueType::Date => parse_date_with_hint(trimmed, hint.date_pattern.as_deref())
            .map(MetricValue::Date)
            .ok_or_else(fail),
    }
}

/// Extracts the numeric part of a cell: plain, grouped, decimal-comma,
/// or currency-tagged.
fn numeric_part(trimmed: &str, hint: &FormatHint) -> Option<f64> {
    if hint.decimal_comma && trimmed.contains(',') && !trimmed.contains('.') {
        // The sample established a decimal-comma locale, so "1,234"
        // means 1.234 here, not one thousand.
        let cleaned: String = trimmed
            .chars()
            .filter(|c| *c != ' ')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        if let Ok(value) = cleaned.parse::<f64>() {
            return Some(value);
        }
    }
    if let Some(parsed) = parse_number(trimmed) {
        return Some(parsed.value);
    }
    parse_currency(trimmed).map(|(parsed, _)| parsed.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn no_hint() -> FormatHint {
        FormatHint::default()
    }

    #[test]
    fn percentage_becomes_fraction() {
        let value = coerce("45%", ValueType::Percentage, &no_hint()).unwrap();
        assert_eq!(value, MetricValue::Percentage(0.45));
        assert_eq!(value.render(), "45.0%");
    }

    #[test]
    fn bare_number_in_percentage_field_is_percent_points() {
        let value = coerce("1.2", ValueType::Percentage, &no_hint()).unwrap();
        assert_eq!(value, MetricValue::Percentage(0.012));
    }

    #[test]
    fn currency_with_and_without_symbol() {
        assert_eq!(
            coerce("$1,200.50", ValueType::Currency, &no_hint()).unwrap(),
            MetricValue::Currency(1200.50)
        );
        assert_eq!(
            coerce("456.78", ValueType::Currency, &no_hint()).unwrap(),
            MetricValue::Currency(456.78)
        );
    }

    #[test]
    fn number_strips_grouping() {
        assert_eq!(
            coerce("15,420", ValueType::Number, &no_hint()).unwrap(),
            MetricValue::Number(15420.0)
        );
    }

    #[test]
    fn decimal_comma_hint_overrides_grouping() {
        let hint = FormatHint {
            decimal_comma: true,
            ..FormatHint::default()
        };
        assert_eq!(
            coerce("1,234", ValueType::Number, &hint).unwrap(),
            MetricValue::Number(1.234)
        );
    }

    #[test]
    fn date_uses_recorded_pattern_first() {
        let hint = FormatHint {
            date_pattern: Some("%d/%m/%Y".to_string()),
            ..FormatHint::default()
        };
        assert_eq!(
            coerce("03/04/2026", ValueType::Date, &hint).unwrap(),
            MetricValue::Date(NaiveDate::from_ymd_opt(2026, 4, 3).unwrap())
        );
    }

    #[test]
    fn booleans() {
        assert_eq!(
            coerce("Yes", ValueType::Boolean, &no_hint()).unwrap(),
            MetricValue::Boolean(true)
        );
        assert_eq!(
            coerce("0", ValueType::Boolean, &no_hint()).unwrap(),
            MetricValue::Boolean(false)
        );
        assert!(coerce("maybe", ValueType::Boolean, &no_hint()).is_err());
    }

    #[test]
    fn failure_reports_raw_and_expected() {
        let error = coerce("n/a", ValueType::Number, &no_hint()).unwrap_err();
        assert_eq!(error.raw, "n/a");
        assert_eq!(error.expected, ValueType::Number);
    }
}
