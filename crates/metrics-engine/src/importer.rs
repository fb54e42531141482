//! Import orchestration.

use tracing::{debug, info, warn};

use metrics_infer::classify_column;
use metrics_map::{MatchEngine, TemplateStore, suggest_from_template};
use metrics_model::{
    ImportError, ImportResult, InferredType, IssueKind, MappingSet, RawColumn, Result,
};
use metrics_registry::Registry;
use metrics_transform::transform_rows;

use crate::confidence::aggregate;

/// Runs whole import jobs against one registry.
///
/// The importer holds no mutable state; a single instance can serve
/// concurrent jobs.
pub struct Importer<'a> {
    registry: &'a Registry,
}

impl<'a> Importer<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Imports without a template store; matching always runs.
    pub fn import(&self, platform: &str, columns: &[RawColumn]) -> Result<ImportResult> {
        self.import_with_templates(platform, columns, None)
    }

    /// Full import: structural checks, per-column inference, template
    /// lookup or matching, transformation, confidence aggregation.
    ///
    /// Only structural problems (unknown platform, empty column set)
    /// return an error; everything else accumulates into the
    /// [`ImportResult`].
    pub fn import_with_templates(
        &self,
        platform: &str,
        columns: &[RawColumn],
        templates: Option<&dyn TemplateStore>,
    ) -> Result<ImportResult> {
        if columns.is_empty() {
            return Err(ImportError::EmptyColumns);
        }
        let fields = self.registry.fields_for_platform(platform)?;

        let inferred: Vec<InferredType> = columns
            .iter()
            .map(|column| {
                let inferred = classify_column(column);
                debug!(
                    header = %column.header,
                    value_type = %inferred.value_type,
                    confidence = inferred.confidence,
                    "inferred column type"
                );
                inferred
            })
            .collect();

        let mapping = self.resolve_mapping(platform, columns, &inferred, templates, fields);
        info!(
            platform,
            mapped = mapping.mappings.len(),
            unresolved = mapping.unresolved.len(),
            "mapping resolved"
        );

        let outcome = transform_rows(
            columns,
            &inferred,
            &mapping,
            fields,
            self.registry.derived_metrics(),
        );
        let confidence = aggregate(&mapping, fields, &outcome.rows);

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for field_id in &mapping.unresolved {
            errors.push(format!("required field '{field_id}' could not be resolved"));
        }
        for row in &outcome.rows {
            for issue in &row.issues {
                match &issue.kind {
                    IssueKind::CoercionFailure { raw } => errors.push(format!(
                        "row {}: cannot coerce {:?} for field '{}'",
                        row.index, raw, issue.field_id
                    )),
                    IssueKind::ValidationCritical { message } => {
                        errors.push(format!("row {}: {message}", row.index));
                    }
                    IssueKind::ValidationWarning { message } => {
                        warnings.push(format!("row {}: {message}", row.index));
                    }
                }
            }
        }
        for field_id in &confidence.low_confidence_fields {
            warnings.push(format!("mapping for '{field_id}' has low confidence"));
        }

        if confidence.requires_review {
            warn!(
                platform,
                confidence = confidence.aggregate,
                errors = errors.len(),
                "import requires review"
            );
        } else {
            info!(
                platform,
                confidence = confidence.aggregate,
                rows = outcome.rows.len(),
                "import accepted"
            );
        }

        Ok(ImportResult {
            extracted_fields: outcome.extracted_fields,
            total_expected_fields: fields.len(),
            aggregate_confidence: confidence.aggregate,
            requires_review: confidence.requires_review,
            low_confidence_fields: confidence.low_confidence_fields,
            failed_rows: confidence.failed_rows,
            mapping,
            rows: outcome.rows,
            errors,
            warnings,
        })
    }

    /// Uses a stored template when the exact header layout is known,
    /// otherwise runs the matching engine. A failing template store is
    /// reported and degraded to a normal match, never a failed import.
    fn resolve_mapping(
        &self,
        platform: &str,
        columns: &[RawColumn],
        inferred: &[InferredType],
        templates: Option<&dyn TemplateStore>,
        fields: &[metrics_registry::CanonicalField],
    ) -> MappingSet {
        if let Some(store) = templates {
            let headers: Vec<&str> = columns.iter().map(|c| c.header.as_str()).collect();
            match suggest_from_template(store, platform, &headers) {
                Ok(Some(stored)) => {
                    info!(platform, "reusing mapping template for known layout");
                    return stored;
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(platform, %error, "template lookup failed; matching from scratch");
                }
            }
        }
        MatchEngine::new(fields).assign(platform, columns, inferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_column_set_is_structural() {
        let registry = Registry::builtin();
        let importer = Importer::new(&registry);
        let error = importer.import("linkedin", &[]).unwrap_err();
        assert!(matches!(error, ImportError::EmptyColumns));
    }

    #[test]
    fn unknown_platform_is_structural() {
        let registry = Registry::builtin();
        let importer = Importer::new(&registry);
        let columns = vec![RawColumn::new("Clicks", vec!["1".to_string()])];
        let error = importer.import("myspace", &columns).unwrap_err();
        assert!(matches!(error, ImportError::UnknownPlatform(_)));
    }
}
