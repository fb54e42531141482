//! Raw source columns as handed in by the caller.

use serde::{Deserialize, Serialize};

/// Maximum number of non-blank values sampled for type inference.
pub const SAMPLE_SIZE: usize = 50;

/// One source column: a header label plus the raw cell text for every row.
///
/// The engine never reads the source itself; spreadsheet exports and
/// document-derived label/value lines are adapted into `RawColumn`s
/// upstream before they reach this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawColumn {
    /// Header label as it appeared in the source.
    pub header: String,
    /// Raw cell strings, one per row. May be empty.
    pub cells: Vec<String>,
}

impl RawColumn {
    pub fn new(header: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            header: header.into(),
            cells,
        }
    }

    /// Returns the first `limit` non-blank cell values.
    ///
    /// Blank cells carry no type signal and are skipped rather than
    /// counted against the sample.
    pub fn sample(&self, limit: usize) -> Vec<&str> {
        self.cells
            .iter()
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .take(limit)
            .collect()
    }

    /// True when every cell in the column is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_skips_blanks() {
        let column = RawColumn::new(
            "Clicks",
            vec![
                String::new(),
                "12".to_string(),
                "  ".to_string(),
                "34".to_string(),
            ],
        );
        assert_eq!(column.sample(10), vec!["12", "34"]);
        assert_eq!(column.sample(1), vec!["12"]);
    }

    #[test]
    fn blank_column_detected() {
        let column = RawColumn::new("Notes", vec![String::new(), " ".to_string()]);
        assert!(column.is_blank());
    }
}
