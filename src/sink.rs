//! The downstream delivery seam.
//!
//! The aggregation backend is an external collaborator: the pipeline hands
//! it canonical rows and a run date, and treats any refusal as fatal.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::types::{AdRecord, OrderRecord};

/// Failure reported by a sink implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SinkError(pub String);

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Downstream store accepting canonical rows.
///
/// Implementations are expected to upsert by natural key so that re-running
/// an ingestion for the same day stays idempotent.
pub trait RecordSink {
    fn upsert_ads(&mut self, records: &[AdRecord]) -> Result<(), SinkError>;

    fn upsert_orders(&mut self, records: &[OrderRecord]) -> Result<(), SinkError>;

    /// Trigger downstream recomputation for the resolved run date.
    ///
    /// `run_date` is `None` when neither source produced records; the sink
    /// decides the policy for that case.
    fn finalize(&mut self, run_date: Option<NaiveDate>) -> Result<(), SinkError>;
}

/// Collects records in memory. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub ads: Vec<AdRecord>,
    pub orders: Vec<OrderRecord>,
    /// Set once `finalize` runs, holding the run date it received.
    pub finalized_with: Option<Option<NaiveDate>>,
}

impl RecordSink for MemorySink {
    fn upsert_ads(&mut self, records: &[AdRecord]) -> Result<(), SinkError> {
        self.ads.extend_from_slice(records);
        Ok(())
    }

    fn upsert_orders(&mut self, records: &[OrderRecord]) -> Result<(), SinkError> {
        self.orders.extend_from_slice(records);
        Ok(())
    }

    fn finalize(&mut self, run_date: Option<NaiveDate>) -> Result<(), SinkError> {
        self.finalized_with = Some(run_date);
        Ok(())
    }
}

/// Writes each record as one JSON object per line — the row shape the
/// aggregation backend ingests.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, record: &T) -> Result<(), SinkError> {
        let line = serde_json::to_string(record).map_err(|e| SinkError::new(e.to_string()))?;
        writeln!(self.writer, "{line}").map_err(|e| SinkError::new(e.to_string()))
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn upsert_ads(&mut self, records: &[AdRecord]) -> Result<(), SinkError> {
        for record in records {
            self.write_line(record)?;
        }
        Ok(())
    }

    fn upsert_orders(&mut self, records: &[OrderRecord]) -> Result<(), SinkError> {
        for record in records {
            self.write_line(record)?;
        }
        Ok(())
    }

    fn finalize(&mut self, _run_date: Option<NaiveDate>) -> Result<(), SinkError> {
        self.writer.flush().map_err(|e| SinkError::new(e.to_string()))
    }
}
