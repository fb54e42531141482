//! Scoring for column-to-field pairs.
//!
//! The tiers, highest first: exact name match, alias match, pattern
//! match. When none fires the score is a weighted blend of type
//! compatibility (scaled by the column's inference confidence) and
//! string similarity against the field's best-matching name or alias.

use std::collections::BTreeSet;

use rapidfuzz::distance::levenshtein::normalized_similarity;

use metrics_model::{InferredType, MatchReason};
use metrics_registry::{CanonicalField, normalize_header};

/// Minimum score for a field to accept a column at all.
pub const MIN_ASSIGN_SCORE: f64 = 0.4;

const ALIAS_SCORE: f64 = 0.9;
const PATTERN_SCORE: f64 = 0.8;
/// Type compatibility is the stronger signal of the two fallback
/// components: a numeric column named obscurely is still more likely a
/// metric than a well-named text column.
const TYPE_WEIGHT: f64 = 0.65;
const SIMILARITY_WEIGHT: f64 = 0.35;
const COMPATIBLE_TYPE_SCORE: f64 = 0.5;

/// Scores one column header against one canonical field.
pub fn score_column(
    field: &CanonicalField,
    header: &str,
    inferred: &InferredType,
) -> (f64, BTreeSet<MatchReason>) {
    let normalized = normalize_header(header);

    if field.matches_exact(&normalized) {
        return (1.0, BTreeSet::from([MatchReason::Exact]));
    }
    if field.matches_alias(&normalized) {
        return (ALIAS_SCORE, BTreeSet::from([MatchReason::Alias]));
    }
    if field.matches_pattern(header) {
        return (PATTERN_SCORE, BTreeSet::from([MatchReason::Pattern]));
    }

    let type_score = if inferred.value_type == field.expected_type {
        1.0
    } else if inferred.value_type.is_compatible_with(field.expected_type) {
        COMPATIBLE_TYPE_SCORE
    } else {
        0.0
    };
    let type_component = type_score * inferred.confidence;
    let similarity = best_similarity(field, &normalized);

    let mut reasons = BTreeSet::new();
    if type_component > 0.0 {
        reasons.insert(MatchReason::Type);
    }
    if similarity > 0.0 {
        reasons.insert(MatchReason::Similarity);
    }

    let score = TYPE_WEIGHT * type_component + SIMILARITY_WEIGHT * similarity;
    (score.clamp(0.0, 1.0), reasons)
}

/// Best edit-distance ratio between the header and the field's id,
/// label, or any alias.
fn best_similarity(field: &CanonicalField, normalized_header: &str) -> f64 {
    let mut best: f64 = 0.0;
    for candidate in [normalize_header(field.id), normalize_header(field.label)]
        .iter()
        .map(String::as_str)
        .chain(field.aliases.iter().map(String::as_str))
    {
        let sim = normalized_similarity(normalized_header.chars(), candidate.chars());
        best = best.max(sim);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_model::{FormatHint, ValueType};
    use metrics_registry::RangeValidator;

    fn number_inferred(confidence: f64) -> InferredType {
        InferredType {
            value_type: ValueType::Number,
            confidence,
            format: FormatHint::default(),
        }
    }

    fn clicks_field() -> CanonicalField {
        CanonicalField::new("clicks", "Clicks", ValueType::Number)
            .aliases(&["link clicks", "total clicks"])
            .validator(RangeValidator::hard_min(0.0))
    }

    #[test]
    fn exact_match_scores_one() {
        let (score, reasons) = score_column(&clicks_field(), "Clicks", &number_inferred(1.0));
        assert_eq!(score, 1.0);
        assert!(reasons.contains(&MatchReason::Exact));
    }

    #[test]
    fn alias_match_scores_below_exact() {
        let (score, reasons) = score_column(&clicks_field(), "Link Clicks", &number_inferred(1.0));
        assert_eq!(score, ALIAS_SCORE);
        assert_eq!(reasons, BTreeSet::from([MatchReason::Alias]));
    }

    #[test]
    fn pattern_match_scores_below_alias() {
        let field = CanonicalField::new("spend", "Spend", ValueType::Currency)
            .pattern(r"(?i)\b(spend|cost)\b");
        let inferred = InferredType {
            value_type: ValueType::Currency,
            confidence: 1.0,
            format: FormatHint::default(),
        };
        let (score, reasons) = score_column(&field, "Total Cost (USD)", &inferred);
        assert_eq!(score, PATTERN_SCORE);
        assert_eq!(reasons, BTreeSet::from([MatchReason::Pattern]));
    }

    #[test]
    fn fallback_blends_type_and_similarity() {
        // Header shares no tier match; type agrees, name is close.
        let (score, reasons) = score_column(&clicks_field(), "Clicksz", &number_inferred(1.0));
        assert!(score > MIN_ASSIGN_SCORE, "got {score}");
        assert!(score < PATTERN_SCORE);
        assert!(reasons.contains(&MatchReason::Type));
        assert!(reasons.contains(&MatchReason::Similarity));
    }

    #[test]
    fn incompatible_type_relies_on_similarity_alone() {
        let field = CanonicalField::new("date", "Date", ValueType::Date);
        let (score, reasons) = score_column(&field, "Datum", &number_inferred(1.0));
        assert!(score < MIN_ASSIGN_SCORE);
        assert!(!reasons.contains(&MatchReason::Type));
    }

    #[test]
    fn low_inference_confidence_drags_the_type_component() {
        let high = score_column(&clicks_field(), "Hits", &number_inferred(1.0)).0;
        let low = score_column(&clicks_field(), "Hits", &number_inferred(0.5)).0;
        assert!(high > low);
    }
}
