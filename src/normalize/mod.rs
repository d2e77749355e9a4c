//! Row normalizers: raw rows -> canonical records + admission statistics.
//!
//! Each normalizer is a pure per-row function returning
//! `Result<Record, SkipReason>`; the module folds the outcomes into emitted
//! records plus [`AdmissionStats`]. Dropping a row is a counted, silent
//! event — input files are known to be irregular.

pub mod ads;
pub mod orders;

use crate::types::AdmissionStats;

/// Why a source row was refused admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Date column missing or unparseable.
    UnparseableDate,
    /// Campaign name column empty.
    MissingCampaignName,
    /// Trailing "Total"/"Grand Total" pseudo-row.
    SummaryRow,
    /// Order id column empty.
    MissingOrderId,
}

/// Fold per-row outcomes into emitted records and admission statistics.
pub fn fold_outcomes<R>(
    outcomes: impl IntoIterator<Item = Result<R, SkipReason>>,
) -> (Vec<R>, AdmissionStats) {
    let mut records = Vec::new();
    let mut stats = AdmissionStats::default();
    for outcome in outcomes {
        stats.total += 1;
        match outcome {
            Ok(record) => {
                stats.inserted += 1;
                records.push(record);
            }
            Err(_) => stats.skipped += 1,
        }
    }
    (records, stats)
}
