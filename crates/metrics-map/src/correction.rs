//! Append-only log of confirmed mapping corrections.
//!
//! When a reviewer overrides a suggested mapping, the caller records the
//! correction here. The runtime registry stays immutable; an offline
//! process reads this log and may propose catalog edits (new aliases,
//! new patterns) from the accumulated evidence.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One confirmed correction, one JSONL line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionRecord {
    pub platform: String,
    /// Raw source header the correction is about.
    pub header: String,
    /// Field the engine suggested, if any.
    pub suggested_field: Option<String>,
    /// Field the reviewer assigned instead.
    pub corrected_field: String,
    /// ISO 8601 timestamp.
    pub recorded_at: String,
}

impl CorrectionRecord {
    pub fn new(
        platform: impl Into<String>,
        header: impl Into<String>,
        suggested_field: Option<String>,
        corrected_field: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            header: header.into(),
            suggested_field,
            corrected_field: corrected_field.into(),
            recorded_at: Utc::now().to_rfc3339(),
        }
    }
}

/// JSONL file appender for correction records.
#[derive(Debug, Clone)]
pub struct CorrectionLog {
    path: PathBuf,
}

impl CorrectionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record. Existing contents are never rewritten.
    pub fn append(&self, record: &CorrectionRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open correction log {}", self.path.display()))?;
        let line =
            serde_json::to_string(record).context("failed to serialize correction record")?;
        writeln!(file, "{line}")
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        Ok(())
    }

    /// Reads the full log, oldest first. Used by offline curation, not
    /// by the engine.
    pub fn read_all(&self) -> Result<Vec<CorrectionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read correction log {}", self.path.display()))?;
        let mut records = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let record: CorrectionRecord =
                serde_json::from_str(line).context("failed to parse correction record")?;
            records.push(record);
        }
        Ok(records)
    }
}
