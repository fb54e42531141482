use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info};

use metrics_engine::Importer;
use metrics_map::{
    CorrectionLog, CorrectionRecord, FileTemplateStore, StoredTemplate, TemplateStore,
    column_signature,
};
use metrics_model::{ImportResult, RawColumn};
use metrics_registry::Registry;

use crate::cli::{CorrectArgs, FieldsArgs, ImportArgs};
use crate::summary::{apply_table_style, header_cell};

/// One finished import job with the context the summary printer needs.
pub struct ImportOutcome {
    pub result: ImportResult,
    pub headers: Vec<String>,
}

pub fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    let columns = load_columns(&args.csv, args.max_rows)?;
    let headers: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
    info!(
        csv = %args.csv.display(),
        columns = columns.len(),
        "loaded export"
    );

    let store = match &args.template_dir {
        Some(dir) => Some(FileTemplateStore::new(dir)?),
        None => None,
    };

    let registry = Registry::builtin();
    let importer = Importer::new(&registry);
    let result = importer.import_with_templates(
        &args.platform,
        &columns,
        store.as_ref().map(|s| s as &dyn TemplateStore),
    )?;

    // Saving is the explicit confirmation step; a gated import is never
    // persisted as a template.
    if args.save_template {
        if result.requires_review {
            info!("import requires review; template not saved");
        } else if let Some(store) = &store {
            let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
            let signature = column_signature(&header_refs);
            store.put(
                &args.platform,
                &signature,
                &StoredTemplate::new(result.mapping.clone()),
            )?;
            info!(platform = %args.platform, "saved mapping template");
        }
    }

    Ok(ImportOutcome { result, headers })
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let registry = Registry::builtin();
    let fields = registry.fields_for_platform(&args.platform)?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Aliases"),
    ]);
    apply_table_style(&mut table);
    for field in fields {
        table.add_row(vec![
            field.id.to_string(),
            field.label.to_string(),
            field.expected_type.as_str().to_string(),
            if field.required { "yes" } else { "" }.to_string(),
            field.aliases.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_correct(args: &CorrectArgs) -> Result<()> {
    // The corrected field must exist in the platform's catalog; this
    // also validates the platform key itself.
    let registry = Registry::builtin();
    let fields = registry.fields_for_platform(&args.platform)?;
    if !fields.iter().any(|f| f.id == args.field) {
        anyhow::bail!(
            "unknown field '{}' for platform '{}'",
            args.field,
            args.platform
        );
    }

    let log = CorrectionLog::new(&args.log);
    log.append(&CorrectionRecord::new(
        args.platform.clone(),
        args.header.clone(),
        args.suggested.clone(),
        args.field.clone(),
    ))?;
    info!(
        platform = %args.platform,
        header = %args.header,
        field = %args.field,
        "recorded correction"
    );
    Ok(())
}

/// Reads a CSV into per-column cell lists. Records shorter than the
/// header row pad with blanks so every column has one cell per row.
fn load_columns(path: &Path, max_rows: Option<usize>) -> Result<Vec<RawColumn>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read headers from {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_index, record) in reader.records().enumerate() {
        if let Some(limit) = max_rows {
            if row_index >= limit {
                debug!(limit, "row limit reached");
                break;
            }
        }
        let record =
            record.with_context(|| format!("failed to read row {row_index} of {}", path.display()))?;
        for (column_index, column) in cells.iter_mut().enumerate() {
            column.push(record.get(column_index).unwrap_or("").to_string());
        }
    }

    Ok(headers
        .into_iter()
        .zip(cells)
        .map(|(header, cells)| RawColumn::new(header, cells))
        .collect())
}
