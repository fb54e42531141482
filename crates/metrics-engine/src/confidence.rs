//! Confidence aggregation and the review gate.

use metrics_model::{MappingSet, TransformedRow};
use metrics_registry::CanonicalField;

/// Results at or above this aggregate confidence may be trusted
/// automatically; anything below goes to human review.
pub const REVIEW_THRESHOLD: f64 = 0.95;

/// Ceiling applied whenever a required field is unresolved. Resolution
/// of all required fields is a hard precondition, so the aggregate can
/// never clear the review threshold without it.
pub const UNRESOLVED_CAP: f64 = 0.6;

/// Per-field mapping confidence below this is reported for review.
pub const LOW_CONFIDENCE_FIELD: f64 = 0.8;

const MAPPING_WEIGHT: f64 = 0.5;
const ROW_WEIGHT: f64 = 0.3;
const RESOLUTION_WEIGHT: f64 = 0.2;

/// Aggregated trust in one import.
#[derive(Debug, Clone)]
pub struct Confidence {
    /// Combined score in [0, 1].
    pub aggregate: f64,
    pub requires_review: bool,
    /// Field ids whose mapping confidence fell below
    /// [`LOW_CONFIDENCE_FIELD`].
    pub low_confidence_fields: Vec<String>,
    /// Indices of rows carrying a critical issue.
    pub failed_rows: Vec<usize>,
}

/// Combines mapping quality, row health, and required-field resolution
/// into one score and a review decision.
pub fn aggregate(
    mapping: &MappingSet,
    fields: &[CanonicalField],
    rows: &[TransformedRow],
) -> Confidence {
    let required_total = fields.iter().filter(|f| f.required).count();

    let mapping_component = mapping_confidence(mapping, fields);
    let row_component = clean_row_fraction(rows);
    let resolution_component = if required_total == 0 {
        1.0
    } else {
        (required_total - mapping.unresolved.len()) as f64 / required_total as f64
    };

    let mut score = MAPPING_WEIGHT * mapping_component
        + ROW_WEIGHT * row_component
        + RESOLUTION_WEIGHT * resolution_component;
    if !mapping.unresolved.is_empty() {
        score = score.min(UNRESOLVED_CAP);
    }
    let score = score.clamp(0.0, 1.0);

    let failed_rows: Vec<usize> = rows
        .iter()
        .filter(|row| row.has_critical())
        .map(|row| row.index)
        .collect();
    let low_confidence_fields: Vec<String> = mapping
        .mappings
        .iter()
        .filter(|m| m.confidence < LOW_CONFIDENCE_FIELD)
        .map(|m| m.field_id.clone())
        .collect();

    let requires_review =
        score < REVIEW_THRESHOLD || !mapping.unresolved.is_empty() || !failed_rows.is_empty();

    Confidence {
        aggregate: score,
        requires_review,
        low_confidence_fields,
        failed_rows,
    }
}

/// Mean mapping confidence over assigned required fields. A catalog
/// without required fields falls back to the mean over all mappings.
fn mapping_confidence(mapping: &MappingSet, fields: &[CanonicalField]) -> f64 {
    let required: Vec<&str> = fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.id)
        .collect();
    let relevant: Vec<f64> = mapping
        .mappings
        .iter()
        .filter(|m| required.is_empty() || required.contains(&m.field_id.as_str()))
        .map(|m| m.confidence)
        .collect();
    if relevant.is_empty() {
        return 0.0;
    }
    relevant.iter().sum::<f64>() / relevant.len() as f64
}

fn clean_row_fraction(rows: &[TransformedRow]) -> f64 {
    if rows.is_empty() {
        return 1.0;
    }
    let clean = rows.iter().filter(|row| !row.has_critical()).count();
    clean as f64 / rows.len() as f64
}
