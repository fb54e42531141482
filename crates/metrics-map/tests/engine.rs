//! End-to-end matching behavior against the built-in catalogs.

use metrics_infer::classify_column;
use metrics_map::{MatchEngine, MIN_ASSIGN_SCORE};
use metrics_model::{InferredType, RawColumn};
use metrics_registry::Registry;
use proptest::prelude::*;

fn columns_from(headers: &[&str], rows: &[&[&str]]) -> Vec<RawColumn> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cells = rows.iter().map(|row| row[i].to_string()).collect();
            RawColumn::new(*header, cells)
        })
        .collect()
}

fn infer_all(columns: &[RawColumn]) -> Vec<InferredType> {
    columns.iter().map(classify_column).collect()
}

#[test]
fn spreadsheet_export_auto_maps() {
    let registry = Registry::builtin();
    let fields = registry.fields_for_platform("google_ads").unwrap();
    let columns = columns_from(
        &["Campaign", "Clicks", "Impressions", "Spend ($)"],
        &[
            &["Q3 Launch", "892", "15420", "456.78"],
            &["Brand Push", "1245", "28900", "789.50"],
        ],
    );
    let inferred = infer_all(&columns);

    let set = MatchEngine::new(fields).assign("google_ads", &columns, &inferred);

    for (field_id, header_index) in [("campaign_name", 0), ("clicks", 1), ("impressions", 2), ("spend", 3)]
    {
        let mapping = set
            .mapping_for(field_id)
            .unwrap_or_else(|| panic!("{field_id} should be mapped"));
        assert_eq!(mapping.column_index, header_index);
        assert!(
            mapping.confidence >= 0.8,
            "{field_id} confidence {} below 0.8",
            mapping.confidence
        );
    }
    assert!(set.unresolved.is_empty());
}

#[test]
fn ctr_percent_header_maps_to_ctr() {
    let registry = Registry::builtin();
    let fields = registry.fields_for_platform("linkedin").unwrap();
    let columns = columns_from(&["CTR %"], &[&["1.2%"], &["0.9%"]]);
    let inferred = infer_all(&columns);

    let set = MatchEngine::new(fields).assign("linkedin", &columns, &inferred);
    let mapping = set.mapping_for("ctr").expect("ctr should be mapped");
    assert_eq!(mapping.column_index, 0);
    assert!(mapping.confidence >= MIN_ASSIGN_SCORE);
}

#[test]
fn missing_spend_column_is_unresolved() {
    let registry = Registry::builtin();
    let fields = registry.fields_for_platform("facebook_ads").unwrap();
    let columns = columns_from(
        &["Campaign", "Clicks", "Impressions"],
        &[&["A", "10", "100"]],
    );
    let inferred = infer_all(&columns);

    let set = MatchEngine::new(fields).assign("facebook_ads", &columns, &inferred);
    assert!(set.unresolved.contains(&"spend".to_string()));
}

proptest! {
    /// Identical (columns, registry) input must yield a byte-identical
    /// MappingSet across invocations.
    #[test]
    fn assignment_is_deterministic(
        headers in proptest::collection::vec("[A-Za-z ]{1,20}", 1..8)
    ) {
        let registry = Registry::builtin();
        let fields = registry.fields_for_platform("custom").unwrap();
        let columns: Vec<RawColumn> = headers
            .iter()
            .map(|h| RawColumn::new(h.clone(), vec!["42".to_string()]))
            .collect();
        let inferred = infer_all(&columns);

        let engine = MatchEngine::new(fields);
        let first = engine.assign("custom", &columns, &inferred);
        let second = engine.assign("custom", &columns, &inferred);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        prop_assert_eq!(first_json, second_json);
    }

    /// No two mappings may consume the same source column.
    #[test]
    fn no_duplicate_column_indices(
        headers in proptest::collection::vec("[A-Za-z ]{1,20}", 1..8)
    ) {
        let registry = Registry::builtin();
        let fields = registry.fields_for_platform("google_ads").unwrap();
        let columns: Vec<RawColumn> = headers
            .iter()
            .map(|h| RawColumn::new(h.clone(), vec!["42".to_string()]))
            .collect();
        let inferred = infer_all(&columns);

        let set = MatchEngine::new(fields).assign("google_ads", &columns, &inferred);
        let mut indices: Vec<usize> = set.mappings.iter().map(|m| m.column_index).collect();
        let total = indices.len();
        indices.sort_unstable();
        indices.dedup();
        prop_assert_eq!(indices.len(), total);
    }
}
