//! Observer hooks for ingestion outcomes.
//!
//! Implementors can record logs, metrics, or trigger alerts. The pipeline
//! reports one success event per normalized source and failure/alert events
//! for fatal errors.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::IngestError;
use crate::source::SourceFormat;
use crate::types::AdmissionStats;

/// Severity classification used for observer callbacks and alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the invocation failed).
    Error,
    /// Critical error (infrastructure: unreadable source, sink failure).
    Critical,
}

/// Pipeline stage an observer event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadAds,
    LoadOrders,
    UpsertAds,
    UpsertOrders,
    Finalize,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::LoadAds => "load_ads",
            Stage::LoadOrders => "load_orders",
            Stage::UpsertAds => "upsert_ads",
            Stage::UpsertOrders => "upsert_orders",
            Stage::Finalize => "finalize",
        }
    }
}

/// Context about the event being observed.
#[derive(Debug, Clone)]
pub struct IngestContext {
    pub stage: Stage,
    /// Source format, when the stage concerns a specific upload.
    pub format: Option<SourceFormat>,
}

/// Observer interface for ingestion outcomes.
pub trait IngestObserver: Send + Sync {
    /// Called after a source normalizes successfully.
    fn on_success(&self, _ctx: &IngestContext, _stats: AdmissionStats) {}

    /// Called when a stage fails fatally.
    fn on_failure(&self, _ctx: &IngestContext, _severity: Severity, _error: &IngestError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestContext, severity: Severity, error: &IngestError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestContext, stats: AdmissionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestContext, severity: Severity, error: &IngestError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestContext, severity: Severity, error: &IngestError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs ingestion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestContext, stats: AdmissionStats) {
        eprintln!(
            "[ingest][ok] stage={} format={:?} total={} inserted={} skipped={}",
            ctx.stage.name(),
            ctx.format,
            stats.total,
            stats.inserted,
            stats.skipped
        );
    }

    fn on_failure(&self, ctx: &IngestContext, severity: Severity, error: &IngestError) {
        eprintln!(
            "[ingest][{:?}] stage={} format={:?} err={}",
            severity,
            ctx.stage.name(),
            ctx.format,
            error
        );
    }

    fn on_alert(&self, ctx: &IngestContext, severity: Severity, error: &IngestError) {
        eprintln!(
            "[ALERT][ingest][{:?}] stage={} format={:?} err={}",
            severity,
            ctx.stage.name(),
            ctx.format,
            error
        );
    }
}

/// Appends ingestion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IngestObserver for FileObserver {
    fn on_success(&self, ctx: &IngestContext, stats: AdmissionStats) {
        self.append_line(&format!(
            "{} ok stage={} format={:?} total={} inserted={} skipped={}",
            unix_ts(),
            ctx.stage.name(),
            ctx.format,
            stats.total,
            stats.inserted,
            stats.skipped
        ));
    }

    fn on_failure(&self, ctx: &IngestContext, severity: Severity, error: &IngestError) {
        self.append_line(&format!(
            "{} fail severity={:?} stage={} format={:?} err={}",
            unix_ts(),
            severity,
            ctx.stage.name(),
            ctx.format,
            error
        ));
    }

    fn on_alert(&self, ctx: &IngestContext, severity: Severity, error: &IngestError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} stage={} format={:?} err={}",
            unix_ts(),
            severity,
            ctx.stage.name(),
            ctx.format,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
