pub mod column;
pub mod error;
pub mod mapping;
pub mod result;
pub mod value;

pub use column::{RawColumn, SAMPLE_SIZE};
pub use error::{ImportError, Result};
pub use mapping::{ColumnMapping, MappingSet, MatchReason};
pub use result::{ImportResult, IssueKind, RowIssue, TransformedRow};
pub use value::{FormatHint, InferredType, MetricValue, ValueType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_set_serializes() {
        let set = MappingSet {
            platform: "linkedin".to_string(),
            mappings: vec![ColumnMapping {
                column_index: 0,
                field_id: "clicks".to_string(),
                confidence: 0.9,
                reasons: [MatchReason::Alias].into_iter().collect(),
            }],
            unresolved: vec!["spend".to_string()],
        };
        let json = serde_json::to_string(&set).expect("serialize mapping set");
        let round: MappingSet = serde_json::from_str(&json).expect("deserialize mapping set");
        assert_eq!(round.platform, "linkedin");
        assert_eq!(round.mappings.len(), 1);
        assert_eq!(round.unresolved, vec!["spend".to_string()]);
    }

    #[test]
    fn import_result_counts() {
        let result = ImportResult {
            mapping: MappingSet {
                platform: "custom".to_string(),
                mappings: vec![],
                unresolved: vec![],
            },
            rows: vec![],
            aggregate_confidence: 1.0,
            requires_review: false,
            extracted_fields: 3,
            total_expected_fields: 9,
            errors: vec![],
            warnings: vec![],
            low_confidence_fields: vec![],
            failed_rows: vec![],
        };
        assert!(!result.requires_review);
        assert_eq!(result.extracted_fields, 3);
    }
}
