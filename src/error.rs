use thiserror::Error;

use crate::sink::SinkError;

/// Convenience result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Error type returned by source loading and the ingestion pipeline.
///
/// Row-level defects never surface here: malformed or irrelevant rows are
/// silently dropped by the normalizers and counted in
/// [`crate::types::AdmissionStats::skipped`]. This enum covers the fatal
/// cases only — unreadable sources and downstream sink failures.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV stream error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be opened or read.
    #[error("workbook error: {0}")]
    Excel(#[from] calamine::Error),

    /// A required source byte stream was unusable as a whole.
    #[error("unreadable source: {message}")]
    Source { message: String },

    /// The downstream sink refused or failed a write/compute step.
    #[error("sink failure during {stage}: {source}")]
    Sink {
        stage: &'static str,
        #[source]
        source: SinkError,
    },
}
