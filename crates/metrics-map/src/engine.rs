//! Deterministic one-to-one assignment.

use std::collections::BTreeSet;

use metrics_model::{ColumnMapping, InferredType, MappingSet, RawColumn};
use metrics_registry::CanonicalField;

use crate::score::{MIN_ASSIGN_SCORE, score_column};

/// Assigns source columns to the canonical fields of one platform.
///
/// Fields are processed in catalog order (required before optional), so
/// required fields get first pick of the columns. Each column is
/// consumed by at most one field; ties go to the lowest column index.
/// Identical inputs always produce an identical [`MappingSet`].
pub struct MatchEngine<'a> {
    fields: &'a [CanonicalField],
}

impl<'a> MatchEngine<'a> {
    pub fn new(fields: &'a [CanonicalField]) -> Self {
        Self { fields }
    }

    /// Computes the full assignment for one import.
    ///
    /// `inferred` must be parallel to `columns`. Required fields that no
    /// column serves above [`MIN_ASSIGN_SCORE`] land in `unresolved`;
    /// surplus columns are simply left unmapped.
    pub fn assign(
        &self,
        platform: &str,
        columns: &[RawColumn],
        inferred: &[InferredType],
    ) -> MappingSet {
        debug_assert_eq!(columns.len(), inferred.len());

        let mut mappings = Vec::new();
        let mut unresolved = Vec::new();
        let mut taken: BTreeSet<usize> = BTreeSet::new();

        for field in self.fields {
            let mut best: Option<(usize, f64, BTreeSet<_>)> = None;
            for (index, column) in columns.iter().enumerate() {
                if taken.contains(&index) {
                    continue;
                }
                let (score, reasons) = score_column(field, &column.header, &inferred[index]);
                // Strictly greater keeps the lowest index on ties.
                if best.as_ref().is_none_or(|(_, best_score, _)| score > *best_score) {
                    best = Some((index, score, reasons));
                }
            }

            match best {
                Some((index, score, reasons)) if score >= MIN_ASSIGN_SCORE => {
                    taken.insert(index);
                    mappings.push(ColumnMapping {
                        column_index: index,
                        field_id: field.id.to_string(),
                        confidence: score,
                        reasons,
                    });
                }
                _ => {
                    if field.required {
                        unresolved.push(field.id.to_string());
                    }
                }
            }
        }

        MappingSet {
            platform: platform.to_string(),
            mappings,
            unresolved,
        }
    }
}
