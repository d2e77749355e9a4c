//! Header alias resolution.
//!
//! Export files spell the same logical column several ways ("Reporting
//! ends" vs "Date", "Invoice Number" vs "Order ID"). Each logical field is
//! described by an ordered candidate list — most specific spelling first —
//! and resolved against a per-row, case/whitespace-insensitive header index.

use std::collections::HashMap;

use crate::types::{RawRow, Value};

/// Normalize a header for matching: trimmed and lowercased.
pub(crate) fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Case-insensitive header lookup, built once per row.
pub struct FieldResolver<'a> {
    row: &'a RawRow,
    by_normalized: HashMap<String, usize>,
}

impl<'a> FieldResolver<'a> {
    pub fn new(row: &'a RawRow) -> Self {
        let mut by_normalized = HashMap::with_capacity(row.cells().len());
        for (idx, (header, _)) in row.cells().iter().enumerate() {
            // First occurrence wins on duplicate headers.
            by_normalized.entry(normalize_header(header)).or_insert(idx);
        }
        Self { row, by_normalized }
    }

    /// Returns the value for the first candidate whose header matches and
    /// whose cell is non-empty. Matches by normalized key, then by the exact
    /// original key as fallback.
    pub fn resolve(&self, candidates: &[&str]) -> Option<&'a Value> {
        for candidate in candidates {
            let value = self
                .by_normalized
                .get(&normalize_header(candidate))
                .map(|&idx| &self.row.cells()[idx].1)
                .or_else(|| self.row.get(candidate));
            if let Some(v) = value {
                if !v.is_empty() {
                    return Some(v);
                }
            }
        }
        None
    }

    /// Like [`Self::resolve`], rendered as owned text.
    pub fn resolve_text(&self, candidates: &[&str]) -> Option<String> {
        self.resolve(candidates)
            .map(Value::render)
            .filter(|s| !s.is_empty())
    }
}
