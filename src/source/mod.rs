//! Tabular source loading: byte buffer + MIME hint -> uniform raw rows.
//!
//! The adapter is intentionally tolerant. Malformed or irrelevant rows are
//! never a load failure — they flow through as raw rows and are filtered by
//! the normalizers. Only an unusable byte stream is fatal.

pub mod csv;
pub mod excel;

use crate::error::IngestError;
use crate::types::RawRow;

/// Source format, inferred from the upload's MIME-like hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with a header row.
    Csv,
    /// Workbook binary (`.xlsx` and friends).
    Excel,
}

impl SourceFormat {
    /// Anything announcing itself as a workbook goes through the
    /// spreadsheet path; everything else is treated as delimited text.
    pub fn from_mime_hint(hint: &str) -> Self {
        let hint = hint.to_ascii_lowercase();
        if hint.contains("excel") || hint.contains("spreadsheet") {
            Self::Excel
        } else {
            Self::Csv
        }
    }
}

/// Load a source into raw rows, dispatching on the MIME hint.
pub fn load_rows(bytes: &[u8], mime_hint: &str) -> Result<Vec<RawRow>, IngestError> {
    match SourceFormat::from_mime_hint(mime_hint) {
        SourceFormat::Csv => csv::load_csv_rows(bytes),
        SourceFormat::Excel => excel::load_workbook_rows(bytes),
    }
}
