// ============================================================
// CSV PARSER
// ============================================================
// Decode fetched bytes and read header-keyed rows

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::csv::CsvRow;
use crate::domain::error::{AppError, Result};

/// CSV reader for comma-separated, header-first documents.
/// Cells are kept verbatim, surrounding whitespace included.
#[derive(Default)]
pub struct CsvParser;

impl CsvParser {
    /// Create a new CSV parser
    pub fn new() -> Self {
        Self
    }

    /// Decode a fetched body as UTF-8
    pub fn decode(bytes: &[u8]) -> Result<&str> {
        std::str::from_utf8(bytes).map_err(|e| {
            AppError::ParseError(format!("CSV body is not valid UTF-8: {}", e))
        })
    }

    /// Parse CSV content, failing before any row is read when a required column is absent
    pub fn parse_content(&self, content: &str, required: &[&str]) -> Result<Vec<CsvRow>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .trim(Trim::None)
            .flexible(true) // Short rows read their missing cells as blank
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        Self::check_columns(&headers, required)?;

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(&headers, &record));
        }

        Ok(rows)
    }

    fn check_columns(headers: &StringRecord, required: &[&str]) -> Result<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|header| header == *column))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::ParseError(format!(
                "CSV is missing required column(s): {}",
                missing.join(", ")
            )))
        }
    }

    fn parse_row(headers: &StringRecord, record: &StringRecord) -> CsvRow {
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        let cells: HashMap<String, String> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.to_string(), record.get(idx).unwrap_or("").to_string()))
            .collect();

        CsvRow::new(line, cells)
    }
}
