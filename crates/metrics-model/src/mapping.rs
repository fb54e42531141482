//! Column-to-field mapping types.
//!
//! A [`MappingSet`] is the full assignment of source columns to canonical
//! fields for one import job. It is the unit stored by the template layer
//! and reused for repeat layouts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Why a column matched a canonical field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// Normalized header equals the field id or label.
    Exact,
    /// Normalized header is in the field's alias set.
    Alias,
    /// Header matched one of the field's regex patterns.
    Pattern,
    /// Inferred column type is compatible with the field's expected type.
    Type,
    /// Header is string-similar to the field's name or an alias.
    Similarity,
}

/// One source column assigned to one canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Index of the source column in the input column list.
    pub column_index: usize,
    /// Canonical field id this column maps onto.
    pub field_id: String,
    /// Confidence in this assignment, in [0, 1].
    pub confidence: f64,
    /// Signals that contributed to the score.
    pub reasons: BTreeSet<MatchReason>,
}

/// The complete assignment for one import.
///
/// Invariants: each `column_index` appears at most once; every required
/// field of the platform catalog is either mapped exactly once or listed
/// in `unresolved`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSet {
    /// Platform key the catalog was resolved for.
    pub platform: String,
    /// Accepted column-to-field assignments.
    pub mappings: Vec<ColumnMapping>,
    /// Required field ids with no acceptable column.
    pub unresolved: Vec<String>,
}

impl MappingSet {
    /// Looks up the mapping for a canonical field id.
    pub fn mapping_for(&self, field_id: &str) -> Option<&ColumnMapping> {
        self.mappings.iter().find(|m| m.field_id == field_id)
    }

    /// True when every required field found a column.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_lookup_by_field() {
        let set = MappingSet {
            platform: "google_ads".to_string(),
            mappings: vec![ColumnMapping {
                column_index: 2,
                field_id: "impressions".to_string(),
                confidence: 1.0,
                reasons: [MatchReason::Exact].into_iter().collect(),
            }],
            unresolved: vec![],
        };
        assert_eq!(set.mapping_for("impressions").unwrap().column_index, 2);
        assert!(set.mapping_for("clicks").is_none());
        assert!(set.is_fully_resolved());
    }
}
