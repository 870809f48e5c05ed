use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::IngestError;

use super::detect::IngestionFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (upload rejected before parsing).
    Warning,
    /// Error-level event (upload content could not be parsed).
    Error,
    /// Critical error (a parser produced an invalid table).
    Critical,
}

impl IngestionSeverity {
    /// Severity assigned to a pipeline failure.
    pub fn for_error(e: &IngestError) -> Self {
        match e {
            IngestError::UnsupportedFormat { .. } => Self::Warning,
            IngestError::MalformedInput { .. } => Self::Error,
            IngestError::SchemaDerivationFailed { .. } => Self::Critical,
        }
    }
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// Declared file name of the upload.
    pub file_name: String,
    /// Declared media type of the upload.
    pub media_type: String,
    /// Detected format; `None` if detection itself failed.
    pub format: Option<IngestionFormat>,
    /// Size of the upload buffer in bytes.
    pub bytes: usize,
}

/// Minimal stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of ingested rows.
    pub rows: usize,
    /// Number of derived columns.
    pub columns: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. The raw decoder error is reachable
/// through [`std::error::Error::source`] on the error passed in.
pub trait IngestionObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when ingestion fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestError) {}

    /// Called when an ingestion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
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

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs ingestion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestionObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        eprintln!("[ingest] {}", success_line(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestError) {
        eprintln!("[ingest] {}", failure_line("fail", ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestError) {
        eprintln!("[ingest] {}", failure_line("ALERT", ctx, severity, error));
    }
}

/// Appends timestamped ingestion events to a local log file, one line per event.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, line: String) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{} {line}", unix_ts());
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.append(success_line(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestError) {
        self.append(failure_line("fail", ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestError) {
        self.append(failure_line("ALERT", ctx, severity, error));
    }
}

fn success_line(ctx: &IngestionContext, stats: IngestionStats) -> String {
    format!(
        "ok {} rows={} columns={}",
        describe(ctx),
        stats.rows,
        stats.columns
    )
}

// `<label> severity=<sev> <context> err=<message>[ cause=<decoder error>]`
fn failure_line(label: &str, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestError) -> String {
    let mut line = format!("{label} severity={severity:?} {} err={error}", describe(ctx));
    if let Some(cause) = std::error::Error::source(error) {
        line.push_str(&format!(" cause={cause}"));
    }
    line
}

fn describe(ctx: &IngestionContext) -> String {
    format!(
        "format={:?} file={} media_type={} bytes={}",
        ctx.format, ctx.file_name, ctx.media_type, ctx.bytes
    )
}

pub(crate) fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
