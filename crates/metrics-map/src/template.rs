//! Mapping templates keyed by platform and column signature.
//!
//! A template is a previously accepted [`MappingSet`] snapshot. The
//! engine only ever reads templates; writing happens in the caller
//! after explicit confirmation (a human approving a mapping). Lookup is
//! exact-signature only, so a template can never be applied to a layout
//! it was not confirmed for.
//!
//! # Storage format
//!
//! [`FileTemplateStore`] keeps one JSON file per template, named
//! `{platform}_{signature}.json`, with a `saved_at` timestamp and a
//! format version.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use metrics_model::MappingSet;

use crate::signature::column_signature;

fn default_version() -> String {
    "1.0".to_string()
}

/// A stored mapping snapshot with repository metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTemplate {
    #[serde(flatten)]
    pub mapping: MappingSet,
    /// ISO 8601 timestamp of when this template was saved.
    pub saved_at: String,
    /// Version of the template format.
    #[serde(default = "default_version")]
    pub version: String,
}

impl StoredTemplate {
    pub fn new(mapping: MappingSet) -> Self {
        Self {
            mapping,
            saved_at: Utc::now().to_rfc3339(),
            version: default_version(),
        }
    }
}

/// External key-value contract for template persistence.
pub trait TemplateStore {
    fn get(&self, platform: &str, signature: &str) -> Result<Option<StoredTemplate>>;
    fn put(&self, platform: &str, signature: &str, template: &StoredTemplate) -> Result<()>;
}

/// Looks up a stored mapping for the exact header layout.
///
/// Returns the stored [`MappingSet`] when the platform and signature
/// match, letting the caller skip the matching engine entirely. The
/// current data still goes through transformation, validation, and the
/// review gate.
pub fn suggest_from_template<S: AsRef<str>>(
    store: &dyn TemplateStore,
    platform: &str,
    headers: &[S],
) -> Result<Option<MappingSet>> {
    let signature = column_signature(headers);
    Ok(store
        .get(platform, &signature)?
        .map(|template| template.mapping))
}

/// Directory-backed template store, one JSON file per template.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    base_dir: PathBuf,
}

impl FileTemplateStore {
    /// Creates the store, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("failed to create template store: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn template_path(&self, platform: &str, signature: &str) -> PathBuf {
        self.base_dir.join(format!("{platform}_{signature}.json"))
    }
}

impl TemplateStore for FileTemplateStore {
    fn get(&self, platform: &str, signature: &str) -> Result<Option<StoredTemplate>> {
        let path = self.template_path(platform, signature);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        let template: StoredTemplate = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse template {}", path.display()))?;
        Ok(Some(template))
    }

    fn put(&self, platform: &str, signature: &str, template: &StoredTemplate) -> Result<()> {
        let path = self.template_path(platform, signature);
        let json = serde_json::to_string_pretty(template)
            .context("failed to serialize mapping template")?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write template {}", path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and embedding callers.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    templates: Mutex<BTreeMap<(String, String), StoredTemplate>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn get(&self, platform: &str, signature: &str) -> Result<Option<StoredTemplate>> {
        let templates = self
            .templates
            .lock()
            .map_err(|_| anyhow!("template store lock poisoned"))?;
        Ok(templates
            .get(&(platform.to_string(), signature.to_string()))
            .cloned())
    }

    fn put(&self, platform: &str, signature: &str, template: &StoredTemplate) -> Result<()> {
        let mut templates = self
            .templates
            .lock()
            .map_err(|_| anyhow!("template store lock poisoned"))?;
        templates.insert(
            (platform.to_string(), signature.to_string()),
            template.clone(),
        );
        Ok(())
    }
}
