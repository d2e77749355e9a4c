//! Workbook loading via `calamine`.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::IngestError;
use crate::resolve::normalize_header;
use crate::types::{RawRow, Value};

/// Sheet the ad platform's "export as xlsx" writes its data into.
const PREFERRED_SHEET: &str = "Raw Data Report";

/// Marker column used to locate the true header row. Workbook exports stack
/// title and metadata rows above the header.
const HEADER_MARKER: &str = "campaign name";

/// Open a workbook from bytes and read its data sheet into raw rows.
///
/// Picks the sheet named [`PREFERRED_SHEET`] if present, else the first
/// sheet; scans top-down for the first row containing the header marker
/// (falling back to row 0); every subsequent row becomes one [`RawRow`]
/// with empty cells mapped to [`Value::Null`].
pub fn load_workbook_rows(bytes: &[u8]) -> Result<Vec<RawRow>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet = if workbook.sheet_names().iter().any(|s| s == PREFERRED_SHEET) {
        PREFERRED_SHEET.to_string()
    } else {
        workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestError::Source {
                message: "workbook has no sheets".to_string(),
            })?
    };

    let range = workbook.worksheet_range(&sheet)?;
    Ok(rows_from_range(&range))
}

fn rows_from_range(range: &calamine::Range<Data>) -> Vec<RawRow> {
    let header_idx = range
        .rows()
        .position(|row| {
            row.iter()
                .any(|cell| normalize_header(&header_cell_text(cell)).contains(HEADER_MARKER))
        })
        .unwrap_or(0);

    let mut remaining = range.rows().skip(header_idx);
    let Some(header_row) = remaining.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(header_cell_text).collect();

    let mut rows = Vec::new();
    for row in remaining {
        let mut raw = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            let cell = row.get(idx).unwrap_or(&Data::Empty);
            raw.push(header.clone(), convert_cell(cell));
        }
        rows.push(raw);
    }
    rows
}

fn header_cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

fn convert_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Text(b.to_string()),
        // Date cells come through as day serials; the date coercer handles
        // the epoch arithmetic.
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(_) => Value::Null,
    }
}
