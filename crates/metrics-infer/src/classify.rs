//! Priority-ordered type detectors.

use std::collections::BTreeMap;

use metrics_model::{FormatHint, InferredType, RawColumn, SAMPLE_SIZE, ValueType};

use crate::parse::{parse_currency, parse_date, parse_number, parse_percentage};

/// Minimal match fraction a detector must reach to claim a column.
pub const ACCEPT_FRACTION: f64 = 0.5;

const BOOLEAN_WORDS: [&str; 6] = ["true", "false", "yes", "no", "y", "n"];

/// Samples a column and classifies it.
pub fn classify_column(column: &RawColumn) -> InferredType {
    let sample = column.sample(SAMPLE_SIZE);
    classify(&sample)
}

/// Classifies a sample of non-blank values.
///
/// Detectors run in priority order; the first whose match fraction
/// reaches [`ACCEPT_FRACTION`] wins and its fraction becomes the
/// confidence. When none qualifies the column is text with confidence
/// 1.0 (the ambiguous case is non-fatal by design).
pub fn classify(sample: &[&str]) -> InferredType {
    if sample.is_empty() {
        return InferredType::text();
    }

    let detectors: [(ValueType, fn(&[&str]) -> (f64, FormatHint)); 5] = [
        (ValueType::Boolean, detect_boolean),
        (ValueType::Percentage, detect_percentage),
        (ValueType::Currency, detect_currency),
        (ValueType::Date, detect_date),
        (ValueType::Number, detect_number),
    ];

    for (value_type, detector) in detectors {
        let (fraction, format) = detector(sample);
        if fraction >= ACCEPT_FRACTION {
            return InferredType {
                value_type,
                confidence: fraction,
                format,
            };
        }
    }
    InferredType::text()
}

/// Boolean membership, case-insensitive.
///
/// Bare `1`/`0` values are only boolean evidence when the sample also
/// contains a textual token; otherwise a binary count column would be
/// misread as boolean.
fn detect_boolean(sample: &[&str]) -> (f64, FormatHint) {
    let mut matched = 0usize;
    let mut textual = false;
    for value in sample {
        let lower = value.to_lowercase();
        if BOOLEAN_WORDS.contains(&lower.as_str()) {
            matched += 1;
            textual = true;
        } else if lower == "1" || lower == "0" {
            matched += 1;
        }
    }
    if !textual {
        return (0.0, FormatHint::default());
    }
    (matched as f64 / sample.len() as f64, FormatHint::default())
}

fn detect_percentage(sample: &[&str]) -> (f64, FormatHint) {
    let mut matched = 0usize;
    let mut decimal_commas = 0usize;
    for value in sample {
        if let Some(parsed) = parse_percentage(value) {
            matched += 1;
            if parsed.decimal_comma {
                decimal_commas += 1;
            }
        }
    }
    let hint = FormatHint {
        decimal_comma: decimal_commas * 2 > matched,
        ..FormatHint::default()
    };
    (matched as f64 / sample.len() as f64, hint)
}

/// Currency: a symbol-tagged amount, or a grouped number ("1,234").
fn detect_currency(sample: &[&str]) -> (f64, FormatHint) {
    let mut matched = 0usize;
    let mut decimal_commas = 0usize;
    let mut symbols: BTreeMap<char, usize> = BTreeMap::new();
    for value in sample {
        if let Some((parsed, symbol)) = parse_currency(value) {
            matched += 1;
            *symbols.entry(symbol).or_insert(0) += 1;
            if parsed.decimal_comma {
                decimal_commas += 1;
            }
        } else if let Some(parsed) = parse_number(value)
            && parsed.grouped
        {
            matched += 1;
            if parsed.decimal_comma {
                decimal_commas += 1;
            }
        }
    }
    let dominant_symbol = symbols
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(symbol, _)| symbol);
    let hint = FormatHint {
        decimal_comma: decimal_commas * 2 > matched,
        currency_symbol: dominant_symbol,
        ..FormatHint::default()
    };
    (matched as f64 / sample.len() as f64, hint)
}

fn detect_date(sample: &[&str]) -> (f64, FormatHint) {
    let mut matched = 0usize;
    let mut patterns: BTreeMap<&'static str, usize> = BTreeMap::new();
    for value in sample {
        if let Some((_, pattern)) = parse_date(value) {
            matched += 1;
            *patterns.entry(pattern).or_insert(0) += 1;
        }
    }
    let dominant = patterns
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(pattern, _)| pattern.to_string());
    let hint = FormatHint {
        date_pattern: dominant,
        ..FormatHint::default()
    };
    (matched as f64 / sample.len() as f64, hint)
}

fn detect_number(sample: &[&str]) -> (f64, FormatHint) {
    let mut matched = 0usize;
    let mut decimal_commas = 0usize;
    for value in sample {
        if let Some(parsed) = parse_number(value) {
            matched += 1;
            if parsed.decimal_comma {
                decimal_commas += 1;
            }
        }
    }
    let hint = FormatHint {
        decimal_comma: decimal_commas * 2 > matched,
        ..FormatHint::default()
    };
    (matched as f64 / sample.len() as f64, hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mostly_percentages_wins_with_high_confidence() {
        // 9 of 10 values parse as percentages.
        let sample = vec![
            "1.2%", "3.4%", "0.9%", "2.2%", "5.1%", "4.4%", "1.0%", "2.8%", "3.3%", "n/a",
        ];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Percentage);
        assert!(inferred.confidence >= 0.9);
    }

    #[test]
    fn textual_booleans_win_over_number() {
        let sample = vec!["yes", "no", "yes", "1", "no"];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Boolean);
        assert_eq!(inferred.confidence, 1.0);
    }

    #[test]
    fn binary_count_column_stays_numeric() {
        let sample = vec!["1", "0", "1", "1", "0"];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Number);
    }

    #[test]
    fn currency_symbol_recorded_in_hint() {
        let sample = vec!["$456.78", "$789.50", "$234.25"];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Currency);
        assert_eq!(inferred.format.currency_symbol, Some('$'));
    }

    #[test]
    fn grouped_numbers_read_as_currency() {
        let sample = vec!["1,234", "45,000", "2,800"];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Currency);
    }

    #[test]
    fn dates_record_the_dominant_pattern() {
        let sample = vec!["2026-01-05", "2026-01-06", "2026-01-07"];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Date);
        assert_eq!(inferred.format.date_pattern.as_deref(), Some("%Y-%m-%d"));
    }

    #[test]
    fn plain_numbers() {
        let sample = vec!["15420", "28900", "8750"];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Number);
        assert_eq!(inferred.confidence, 1.0);
    }

    #[test]
    fn mixed_text_falls_back_to_text() {
        let sample = vec!["Q3 Launch", "Brand Awareness", "Summer Sale", "12"];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Text);
        assert_eq!(inferred.confidence, 1.0);
    }

    #[test]
    fn decimal_comma_majority_sets_hint() {
        let sample = vec!["3,5", "4,2", "1,9"];
        let inferred = classify(&sample);
        assert_eq!(inferred.value_type, ValueType::Number);
        assert!(inferred.format.decimal_comma);
    }

    #[test]
    fn empty_sample_is_text() {
        let inferred = classify(&[]);
        assert_eq!(inferred.value_type, ValueType::Text);
        assert_eq!(inferred.confidence, 1.0);
    }
}
