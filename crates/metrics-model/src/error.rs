//! Structural errors.
//!
//! Only structurally invalid input aborts an import. Per-cell and
//! per-row problems accumulate into the [`crate::ImportResult`] instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The platform key has no canonical field catalog.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
    /// The caller supplied no columns at all.
    #[error("no source columns supplied")]
    EmptyColumns,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
