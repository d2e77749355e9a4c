//! Ingestion orchestration.
//!
//! [`run_ingestion`] drives the two normalizers over their sources,
//! resolves the run date, delivers canonical rows to the sink in a single
//! logical unit, and reports aggregated admission statistics. Partial
//! success is not a concept: either both sources normalize and every sink
//! call succeeds, or the invocation fails with a stage-identifying error.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::IngestError;
use crate::normalize::{ads, orders};
use crate::observability::{IngestContext, IngestObserver, Severity, Stage};
use crate::sink::RecordSink;
use crate::source::{self, SourceFormat};
use crate::types::AdmissionStats;

/// Default SGD -> BDT multiplier when no configuration is supplied.
pub const DEFAULT_CURRENCY_RATE: f64 = 95.0;

/// Environment variable overriding the currency rate in deployments.
pub const CURRENCY_RATE_ENV: &str = "FX_SGD_TO_BDT";

/// One uploaded source: its bytes plus the MIME-like hint supplied by the
/// upload boundary.
#[derive(Debug, Clone, Copy)]
pub struct SourceInput<'a> {
    pub bytes: &'a [u8],
    pub mime_hint: &'a str,
}

/// Options controlling one ingestion run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestOptions {
    /// Multiplier from the ad platform's native currency to the ledger
    /// currency. Must be positive.
    pub currency_rate: f64,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for IngestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestOptions")
            .field("currency_rate", &self.currency_rate)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            currency_rate: DEFAULT_CURRENCY_RATE,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

impl IngestOptions {
    /// Build options from the environment, falling back to defaults when
    /// [`CURRENCY_RATE_ENV`] is unset or not a positive number.
    pub fn from_env() -> Self {
        let currency_rate = std::env::var(CURRENCY_RATE_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|rate| *rate > 0.0)
            .unwrap_or(DEFAULT_CURRENCY_RATE);
        Self {
            currency_rate,
            ..Default::default()
        }
    }
}

/// Aggregated outcome of one ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IngestReport {
    pub ads: AdmissionStats,
    pub orders: AdmissionStats,
    /// Business date the batch is attributed to: the first order record's
    /// date, else the first ad record's date, else `None`.
    pub run_date: Option<NaiveDate>,
}

/// Run one ingestion: load and normalize both sources, hand the canonical
/// rows to `sink`, and trigger its downstream recompute step.
///
/// Source-level failures (unreadable byte stream) abort before any sink
/// call. Sink failures abort the invocation and name the failing stage; no
/// retry is attempted here — that is a policy for the layer above.
pub fn run_ingestion(
    ads_source: SourceInput<'_>,
    orders_source: SourceInput<'_>,
    sink: &mut dyn RecordSink,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let ads_ctx = IngestContext {
        stage: Stage::LoadAds,
        format: Some(SourceFormat::from_mime_hint(ads_source.mime_hint)),
    };
    let orders_ctx = IngestContext {
        stage: Stage::LoadOrders,
        format: Some(SourceFormat::from_mime_hint(orders_source.mime_hint)),
    };

    let ads_rows = report_err(
        options,
        &ads_ctx,
        source::load_rows(ads_source.bytes, ads_source.mime_hint),
    )?;
    let orders_rows = report_err(
        options,
        &orders_ctx,
        source::load_rows(orders_source.bytes, orders_source.mime_hint),
    )?;

    let (ad_records, ads_stats) = ads::normalize_ads_rows(&ads_rows, options.currency_rate);
    let (order_records, orders_stats) = orders::normalize_orders_rows(&orders_rows);

    if let Some(obs) = options.observer.as_ref() {
        obs.on_success(&ads_ctx, ads_stats);
        obs.on_success(&orders_ctx, orders_stats);
    }

    let run_date = order_records
        .first()
        .map(|r| r.order_date)
        .or_else(|| ad_records.first().map(|r| r.date));

    deliver(options, sink, Stage::UpsertAds, |sink| {
        sink.upsert_ads(&ad_records)
    })?;
    deliver(options, sink, Stage::UpsertOrders, |sink| {
        sink.upsert_orders(&order_records)
    })?;
    deliver(options, sink, Stage::Finalize, |sink| {
        sink.finalize(run_date)
    })?;

    Ok(IngestReport {
        ads: ads_stats,
        orders: orders_stats,
        run_date,
    })
}

fn deliver(
    options: &IngestOptions,
    sink: &mut dyn RecordSink,
    stage: Stage,
    op: impl FnOnce(&mut dyn RecordSink) -> Result<(), crate::sink::SinkError>,
) -> Result<(), IngestError> {
    let ctx = IngestContext {
        stage,
        format: None,
    };
    let result = op(sink).map_err(|source| IngestError::Sink {
        stage: stage.name(),
        source,
    });
    report_err(options, &ctx, result)
}

fn report_err<T>(
    options: &IngestOptions,
    ctx: &IngestContext,
    result: Result<T, IngestError>,
) -> Result<T, IngestError> {
    if let (Some(obs), Err(error)) = (options.observer.as_ref(), &result) {
        let severity = severity_for_error(error);
        obs.on_failure(ctx, severity, error);
        if severity >= options.alert_at_or_above {
            obs.on_alert(ctx, severity, error);
        }
    }
    result
}

fn severity_for_error(error: &IngestError) -> Severity {
    match error {
        IngestError::Source { .. } | IngestError::Sink { .. } => Severity::Critical,
        IngestError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        IngestError::Excel(_) => Severity::Error,
    }
}
