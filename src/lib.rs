//! `spend-ingest` normalizes heterogeneous daily marketing-spend and order
//! export files (CSV or spreadsheet, with inconsistent headers, date formats,
//! and units) into canonical records and forwards them to a downstream
//! aggregation sink.
//!
//! The primary entrypoint is [`pipeline::run_ingestion`], which takes one
//! "ads" source and one "orders" source (byte buffer + MIME-like hint each),
//! normalizes both, and delivers the canonical rows to a [`sink::RecordSink`]
//! in a single logical unit.
//!
//! ## What the pipeline does
//!
//! - **Header resolution**: each logical field has an ordered list of
//!   accepted header spellings, matched case/whitespace-insensitively
//!   ([`resolve`]).
//! - **Loose coercion**: numbers with grouping separators, and dates in
//!   ISO/RFC, day-first numeric, day-month-name, or spreadsheet-serial form
//!   ([`coerce`]).
//! - **Row admission**: summary pseudo-rows and rows missing required fields
//!   are dropped and counted, never fatal ([`normalize`]).
//! - **Currency conversion** and the campaign-row zeroing invariant for ad
//!   spend figures ([`normalize::ads`]).
//!
//! ## Quick example
//!
//! ```
//! use spend_ingest::pipeline::{run_ingestion, IngestOptions, SourceInput};
//! use spend_ingest::sink::MemorySink;
//!
//! # fn main() -> Result<(), spend_ingest::IngestError> {
//! let ads = b"Reporting ends,Campaign name,Delivery level,Amount spent (SGD)\n\
//! 2025-08-17,August Broad,campaign,10\n";
//! let orders = b"Invoice Number,Creation Date,Order Status,Paid Amount\n\
//! INV-1,17/08/2025,Paid,\"1,250\"\n";
//!
//! let mut sink = MemorySink::default();
//! let report = run_ingestion(
//!     SourceInput { bytes: ads, mime_hint: "text/csv" },
//!     SourceInput { bytes: orders, mime_hint: "text/csv" },
//!     &mut sink,
//!     &IngestOptions::default(),
//! )?;
//!
//! assert_eq!(report.ads.inserted, 1);
//! assert_eq!(sink.ads[0].spend_bdt, 950.0);
//! assert_eq!(sink.orders[0].paid_amount_bdt, 1250.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`source`]: byte buffer + MIME hint -> uniform raw rows (CSV via `csv`,
//!   workbooks via `calamine`)
//! - [`resolve`]: header alias resolution
//! - [`coerce`]: numeric and loose date coercion
//! - [`normalize`]: per-row normalizers and admission statistics
//! - [`pipeline`]: the orchestrator and its options
//! - [`sink`]: the downstream delivery seam
//! - [`observability`]: observer hooks for logging and alerting
//! - [`error`]: error types

pub mod coerce;
pub mod error;
pub mod normalize;
pub mod observability;
pub mod pipeline;
pub mod resolve;
pub mod sink;
pub mod source;
pub mod types;

pub use error::{IngestError, IngestResult};
pub use pipeline::{run_ingestion, IngestOptions, IngestReport, SourceInput};
