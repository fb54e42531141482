//! Matching engine: scores column/field compatibility and computes a
//! deterministic one-to-one assignment, plus the mapping-template layer
//! that lets repeat layouts bypass matching entirely.

pub mod correction;
pub mod engine;
pub mod score;
pub mod signature;
pub mod template;

pub use correction::{CorrectionLog, CorrectionRecord};
pub use engine::MatchEngine;
pub use score::{MIN_ASSIGN_SCORE, score_column};
pub use signature::column_signature;
pub use template::{
    FileTemplateStore, MemoryTemplateStore, StoredTemplate, TemplateStore, suggest_from_template,
};
