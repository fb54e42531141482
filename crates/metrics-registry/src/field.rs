//! Canonical field definitions.

use metrics_model::{MetricValue, ValueType};
use regex::Regex;

use crate::validator::RangeValidator;

/// Normalizes a header or alias for comparison: lowercased, separators
/// collapsed to single spaces.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\', '(', ')'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Post-coercion adjustment applied before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTransform {
    /// Count metrics are whole numbers; round off export artifacts
    /// like "1234.0".
    NonNegativeInteger,
}

impl FieldTransform {
    pub fn apply(&self, value: MetricValue) -> MetricValue {
        match (self, value) {
            (FieldTransform::NonNegativeInteger, MetricValue::Number(v)) => {
                MetricValue::Number(v.round())
            }
            (_, other) => other,
        }
    }
}

/// One target metric field in a platform catalog.
///
/// Aliases are stored normalized; patterns are compiled once when the
/// catalog is built.
#[derive(Debug, Clone)]
pub struct CanonicalField {
    /// Stable id, e.g. `clicks`.
    pub id: &'static str,
    /// Display label, e.g. "Clicks".
    pub label: &'static str,
    /// Required fields gate the review decision when unresolved.
    pub required: bool,
    pub expected_type: ValueType,
    /// Normalized alternative header spellings.
    pub aliases: Vec<String>,
    /// Regexes matched against the raw header.
    pub patterns: Vec<Regex>,
    pub validator: Option<RangeValidator>,
    pub transform: Option<FieldTransform>,
}

impl CanonicalField {
    pub fn new(id: &'static str, label: &'static str, expected_type: ValueType) -> Self {
        Self {
            id,
            label,
            required: false,
            expected_type,
            aliases: Vec::new(),
            patterns: Vec::new(),
            validator: None,
            transform: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| normalize_header(a)).collect();
        self
    }

    /// Compiles `pattern` into the field's pattern set.
    ///
    /// Panics on an invalid pattern, which only happens with a broken
    /// built-in catalog and is caught by the catalog tests.
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.patterns
            .push(Regex::new(pattern).expect("built-in catalog pattern must compile"));
        self
    }

    pub fn validator(mut self, validator: RangeValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn transform(mut self, transform: FieldTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// True when the normalized header equals the field id or label.
    pub fn matches_exact(&self, normalized_header: &str) -> bool {
        normalized_header == normalize_header(self.id)
            || normalized_header == normalize_header(self.label)
    }

    /// True when the normalized header is in the alias set.
    pub fn matches_alias(&self, normalized_header: &str) -> bool {
        self.aliases.iter().any(|a| a == normalized_header)
    }

    /// True when the raw header matches one of the field's patterns.
    pub fn matches_pattern(&self, raw_header: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(raw_header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_separators() {
        assert_eq!(normalize_header("  Spend ($) "), "spend $");
        assert_eq!(normalize_header("Click-Through_Rate"), "click through rate");
        assert_eq!(normalize_header("CAMPAIGN NAME"), "campaign name");
    }

    #[test]
    fn exact_alias_and_pattern_tiers() {
        let field = CanonicalField::new("ctr", "CTR", ValueType::Percentage)
            .aliases(&["click through rate", "CTR %"])
            .pattern(r"(?i)^ctr\b");
        assert!(field.matches_exact("ctr"));
        assert!(field.matches_alias("click through rate"));
        assert!(field.matches_alias(&normalize_header("CTR %")));
        assert!(field.matches_pattern("CTR (all)"));
        assert!(!field.matches_pattern("spend"));
    }

    #[test]
    fn integer_transform_rounds() {
        let transform = FieldTransform::NonNegativeInteger;
        assert_eq!(
            transform.apply(MetricValue::Number(1234.0)),
            MetricValue::Number(1234.0)
        );
        assert_eq!(
            transform.apply(MetricValue::Number(12.6)),
            MetricValue::Number(13.0)
        );
    }
}
