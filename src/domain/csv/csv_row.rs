// ============================================================
// CSV ROW TYPES
// ============================================================
// Header-keyed view over one data row of a CSV document

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::{AppError, Result};

/// A single data row, keyed by header name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvRow {
    /// 1-based line number of the row in the source document
    pub line: u64,

    /// Cell text by column name, verbatim (no trimming)
    pub cells: HashMap<String, String>,
}

impl CsvRow {
    /// Create a new CSV row
    pub fn new(line: u64, cells: HashMap<String, String>) -> Self {
        Self { line, cells }
    }

    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<'a>(line: u64, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let cells = pairs
            .into_iter()
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        Self { line, cells }
    }

    /// Cell text for `column`; cells missing from a short row read as blank
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Run `parse` over the cell in `column`, tagging failures with the row position
    pub fn parse_with<T>(&self, column: &str, parse: impl FnOnce(&str) -> Result<T>) -> Result<T> {
        parse(self.get(column)).map_err(|err| match err {
            AppError::ParseError(msg) => {
                AppError::ParseError(format!("line {}, column '{}': {}", self.line, column, msg))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cell_reads_blank() {
        let row = CsvRow::from_pairs(2, [("State", "Texas")]);
        assert_eq!(row.get("State"), "Texas");
        assert_eq!(row.get("District"), "");
    }

    #[test]
    fn test_parse_with_tags_line_and_column() {
        let row = CsvRow::from_pairs(7, [("Weight", "12x")]);
        let err = row
            .parse_with("Weight", |_| -> Result<u64> {
                Err(AppError::ParseError("not a number".to_string()))
            })
            .unwrap_err();
        assert_eq!(
            err,
            AppError::ParseError("line 7, column 'Weight': not a number".to_string())
        );
    }
}
