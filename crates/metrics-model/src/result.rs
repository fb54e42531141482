//! Transformed rows and the final import result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::mapping::MappingSet;
use crate::value::MetricValue;

/// A per-cell or per-row problem recorded during transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// The raw cell could not be coerced to the field's expected type.
    /// The field is left absent; no default is substituted.
    CoercionFailure { raw: String },
    /// Soft-range violation. Recorded, non-fatal.
    ValidationWarning { message: String },
    /// Hard-invariant violation. Marks the row erroneous.
    ValidationCritical { message: String },
}

impl IssueKind {
    pub fn is_critical(&self) -> bool {
        matches!(self, IssueKind::ValidationCritical { .. })
    }
}

/// An issue tied to a canonical field within one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowIssue {
    pub field_id: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

/// One input row after coercion and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedRow {
    /// Zero-based row index in the source.
    pub index: usize,
    /// Successfully coerced values, keyed by canonical field id.
    /// A field that failed coercion is simply absent here.
    pub values: BTreeMap<String, MetricValue>,
    /// Problems encountered while processing this row.
    pub issues: Vec<RowIssue>,
}

impl TransformedRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            values: BTreeMap::new(),
            issues: Vec::new(),
        }
    }

    /// True when the row carries at least one critical issue.
    pub fn has_critical(&self) -> bool {
        self.issues.iter().any(|issue| issue.kind.is_critical())
    }
}

/// Final output of one import job.
///
/// The consumer decides how to display or persist this; the engine only
/// guarantees that a low-confidence import is never presented as fully
/// successful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub mapping: MappingSet,
    pub rows: Vec<TransformedRow>,
    /// Combined confidence over mapping quality, row health, and
    /// required-field resolution, in [0, 1].
    pub aggregate_confidence: f64,
    /// True when the result must be reviewed by a human before use.
    pub requires_review: bool,
    /// Distinct canonical fields with at least one coerced value.
    pub extracted_fields: usize,
    /// Size of the platform's canonical catalog.
    pub total_expected_fields: usize,
    /// Itemized errors (unresolved fields, critical rows, coercion failures).
    pub errors: Vec<String>,
    /// Itemized warnings (soft-range violations, low-confidence mappings).
    pub warnings: Vec<String>,
    /// Field ids whose mapping confidence fell below the review threshold.
    pub low_confidence_fields: Vec<String>,
    /// Indices of rows carrying a critical issue.
    pub failed_rows: Vec<usize>,
}
