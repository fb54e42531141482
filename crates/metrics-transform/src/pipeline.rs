//! Row transformation: coercion, validation, derived metrics.

use std::collections::{BTreeMap, BTreeSet};

use metrics_model::{
    InferredType, IssueKind, MappingSet, MetricValue, RawColumn, RowIssue, TransformedRow,
};
use metrics_registry::{CanonicalField, DerivedMetric, ValidationOutcome};

use crate::coerce::coerce;

/// Transformed rows plus field-level accounting.
#[derive(Debug)]
pub struct TransformOutcome {
    pub rows: Vec<TransformedRow>,
    /// Distinct canonical fields with at least one successfully coerced
    /// value anywhere in the import. Derived values do not count.
    pub extracted_fields: usize,
}

/// Applies an accepted mapping to the raw rows.
///
/// `inferred` is parallel to `columns` and supplies the format hints
/// recorded during classification. Blank cells are left absent without
/// an issue; a non-blank cell that fails coercion records a
/// [`IssueKind::CoercionFailure`] and stays absent. Validation runs on
/// every coerced value, and derived metrics fill in only where all of
/// their inputs made it through coercion.
pub fn transform_rows(
    columns: &[RawColumn],
    inferred: &[InferredType],
    mapping: &MappingSet,
    fields: &[CanonicalField],
    derived: &[DerivedMetric],
) -> TransformOutcome {
    let field_index: BTreeMap<&str, &CanonicalField> =
        fields.iter().map(|f| (f.id, f)).collect();
    let row_count = mapping
        .mappings
        .iter()
        .filter_map(|m| columns.get(m.column_index))
        .map(|c| c.cells.len())
        .max()
        .unwrap_or(0);

    let mut rows = Vec::with_capacity(row_count);
    let mut coerced_fields: BTreeSet<&str> = BTreeSet::new();

    for row_index in 0..row_count {
        let mut row = TransformedRow::new(row_index);

        for column_mapping in &mapping.mappings {
            let Some(field) = field_index.get(column_mapping.field_id.as_str()) else {
                // Stale template entry for a field no longer in the
                // catalog; nothing to coerce into.
                continue;
            };
            let Some(column) = columns.get(column_mapping.column_index) else {
                continue;
            };
            let raw = column.cells.get(row_index).map(String::as_str).unwrap_or("");
            if raw.trim().is_empty() {
                continue;
            }
            let hint = &inferred[column_mapping.column_index].format;

            match coerce(raw, field.expected_type, hint) {
                Ok(value) => {
                    let value = match field.transform {
                        Some(transform) => transform.apply(value),
                        None => value,
                    };
                    validate_into(field, &value, &mut row);
                    coerced_fields.insert(field.id);
                    row.values.insert(field.id.to_string(), value);
                }
                Err(error) => {
                    row.issues.push(RowIssue {
                        field_id: field.id.to_string(),
                        kind: IssueKind::CoercionFailure { raw: error.raw },
                    });
                }
            }
        }

        apply_derived(&field_index, derived, &mut row);
        rows.push(row);
    }

    TransformOutcome {
        rows,
        extracted_fields: coerced_fields.len(),
    }
}

fn validate_into(field: &CanonicalField, value: &MetricValue, row: &mut TransformedRow) {
    let Some(validator) = &field.validator else {
        return;
    };
    match validator.check(field.label, value) {
        ValidationOutcome::Ok => {}
        ValidationOutcome::Warning(message) => row.issues.push(RowIssue {
            field_id: field.id.to_string(),
            kind: IssueKind::ValidationWarning { message },
        }),
        ValidationOutcome::Critical(message) => row.issues.push(RowIssue {
            field_id: field.id.to_string(),
            kind: IssueKind::ValidationCritical { message },
        }),
    }
}

/// Computes derived metrics for one row. A derived field is skipped
/// when it already has a value, is not in this platform's catalog, or
/// is missing a prerequisite.
fn apply_derived(
    field_index: &BTreeMap<&str, &CanonicalField>,
    derived: &[DerivedMetric],
    row: &mut TransformedRow,
) {
    for metric in derived {
        let Some(field) = field_index.get(metric.field_id) else {
            continue;
        };
        if row.values.contains_key(metric.field_id) || !metric.inputs_present(&row.values) {
            continue;
        }
        if let Some(value) = (metric.compute)(&row.values) {
            validate_into(field, &value, row);
            row.values.insert(metric.field_id.to_string(), value);
        }
    }
}
