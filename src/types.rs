//! Core row and record types for the normalization pipeline.
//!
//! Raw rows are transient: they live for one normalization pass. The
//! canonical records ([`AdRecord`], [`OrderRecord`]) are the pipeline's only
//! durable output, handed once to the sink.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single raw cell as found in a source export.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty cell.
    Null,
    /// Numeric cell (spreadsheet numbers, including date serials).
    Number(f64),
    /// Text cell.
    Text(String),
}

impl Value {
    /// True when the cell carries no usable content.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Number(_) => false,
            Value::Text(s) => s.trim().is_empty(),
        }
    }

    /// Renders the cell as trimmed display text (empty for null).
    ///
    /// Integral numbers render without a trailing `.0` so that numeric ids
    /// read back the way the export showed them.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                (*n as i64).to_string()
            }
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.trim().to_string(),
        }
    }
}

/// One source row: an ordered mapping of header string (as found in the
/// source) to its raw cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, Value)>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(header, value)` pairs.
    pub fn from_pairs(pairs: Vec<(String, Value)>) -> Self {
        Self { cells: pairs }
    }

    /// Append a cell under `header`.
    pub fn push(&mut self, header: impl Into<String>, value: Value) {
        self.cells.push((header.into(), value));
    }

    /// All cells in source order.
    pub fn cells(&self) -> &[(String, Value)] {
        &self.cells
    }

    /// Look up a cell by its exact original header.
    pub fn get(&self, header: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }
}

/// Granularity of an ad-platform export row.
///
/// Campaign-level rows carry the authoritative spend/conversion totals in
/// this export convention; ad-set and ad rows repeat them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryLevel {
    Campaign,
    AdSet,
    Ad,
    /// Row did not declare a delivery level (serialized as `""`).
    #[serde(rename = "")]
    Unspecified,
}

impl DeliveryLevel {
    /// Parse the raw export spelling, case-insensitively.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "campaign" => Self::Campaign,
            "ad set" | "adset" => Self::AdSet,
            "ad" => Self::Ad,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::AdSet => "adset",
            Self::Ad => "ad",
            Self::Unspecified => "",
        }
    }

    pub fn is_campaign(&self) -> bool {
        matches!(self, Self::Campaign)
    }
}

/// Canonical ad-performance record.
///
/// Invariant: `spend_bdt` and `conversations` are non-zero only when
/// `delivery_level` is campaign. Exports repeat aggregate metrics at every
/// delivery level; only the campaign row's figures are trustworthy, so the
/// normalizer zeroes the rest to prevent double counting downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRecord {
    pub date: NaiveDate,
    pub campaign_name: String,
    pub adset_name: String,
    pub ad_name: String,
    pub delivery_level: DeliveryLevel,
    pub is_prospecting: bool,
    pub spend_bdt: f64,
    pub impressions: Option<f64>,
    pub ctr_all: Option<f64>,
    pub frequency: Option<f64>,
    pub conversations: Option<f64>,
}

/// Canonical order record.
///
/// `order_id` and `order_date` are always present; a row missing either is
/// dropped by the normalizer and never reaches this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub order_status: String,
    pub paid_amount_bdt: f64,
    pub due_amount_bdt: f64,
    pub conversation_id: Option<String>,
}

/// Per-source admission statistics: `total == inserted + skipped` always.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionStats {
    /// Source rows examined.
    pub total: usize,
    /// Canonical records produced.
    pub inserted: usize,
    /// Rows dropped by the admission filter.
    pub skipped: usize,
}
