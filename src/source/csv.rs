//! Delimited-text loading.

use crate::error::IngestError;
use crate::types::{RawRow, Value};

/// Parse a delimited-with-header byte buffer into raw rows.
///
/// Bytes are decoded as UTF-8 lossily — exports occasionally carry stray
/// single-byte punctuation. Ragged or otherwise damaged records are dropped
/// here rather than failing the load.
pub fn load_csv_rows(bytes: &[u8]) -> Result<Vec<RawRow>, IngestError> {
    let text = String::from_utf8_lossy(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let Ok(record) = result else { continue };
        let mut row = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            let value = if raw.trim().is_empty() {
                Value::Null
            } else {
                Value::Text(raw.to_string())
            };
            row.push(header, value);
        }
        rows.push(row);
    }
    Ok(rows)
}
