//! Load reporting.
//!
//! [`crate::load::load_from_path`] tells a [`LoadObserver`] what it read (a [`LoadReport`] with
//! one [`SheetReport`] per sheet) or why it failed, graded by [`LoadSeverity`].
//! [`LogObserver`] forwards all of it to the `log` facade.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use log::Level;

use crate::error::CopyError;

use super::unified::LoadFormat;

/// Target used for every record [`LogObserver`] emits.
pub const LOG_TARGET: &str = "copytext::load";

/// How badly a load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// The source was read but does not form a valid copy.
    Error,
    /// The source is missing or cannot be opened at all.
    Critical,
}

impl LoadSeverity {
    /// Severity of a load failure.
    pub fn for_error(e: &CopyError) -> Self {
        match e {
            CopyError::SourceMissing { .. }
            | CopyError::SourceUnreadable { .. }
            | CopyError::Io(_) => LoadSeverity::Critical,
            CopyError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
                _ => LoadSeverity::Error,
            },
            #[cfg(feature = "excel")]
            CopyError::Excel(_) => LoadSeverity::Error,
            CopyError::Json(_) | CopyError::InvalidSource { .. } => LoadSeverity::Error,
        }
    }

    /// Level at which [`LogObserver`] records a failure of this severity.
    pub fn log_level(self) -> Level {
        match self {
            LoadSeverity::Error => Level::Warn,
            LoadSeverity::Critical => Level::Error,
        }
    }
}

/// Which source a load read, and how.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub path: PathBuf,
    pub format: LoadFormat,
}

/// What one sheet contributed to a loaded copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    /// Sheet name.
    pub name: String,
    /// Number of declared columns.
    pub columns: usize,
    /// Rows kept in the model.
    pub rows: usize,
    /// Rows dropped because every declared cell was absent.
    pub skipped_rows: usize,
}

/// Outcome of a successful load, one entry per sheet in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub sheets: Vec<SheetReport>,
}

impl LoadReport {
    /// Rows kept across all sheets.
    pub fn rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows).sum()
    }

    /// Empty rows dropped across all sheets.
    pub fn skipped_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.skipped_rows).sum()
    }

    /// Report for the sheet called `name`.
    pub fn sheet(&self, name: &str) -> Option<&SheetReport> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Receives load outcomes.
pub trait LoadObserver: Send + Sync {
    /// Called when a copy loads successfully.
    fn on_success(&self, _ctx: &LoadContext, _report: &LoadReport) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &CopyError) {}

    /// Called after [`Self::on_failure`] when the severity meets
    /// [`crate::load::CopyOptions::alert_at_or_above`].
    ///
    /// Forwards to [`Self::on_failure`] unless overridden.
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CopyError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Sends every callback to each inner observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, report: &LoadReport) {
        for o in &self.observers {
            o.on_success(ctx, report);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CopyError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CopyError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Records load outcomes through the `log` facade under [`LOG_TARGET`].
///
/// A success is one `info` line plus a `debug` line per sheet. Failures are logged at
/// [`LoadSeverity::log_level`]; alerts always at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, report: &LoadReport) {
        log::info!(
            target: LOG_TARGET,
            "loaded {} ({:?}): {} sheet(s), {} row(s), {} empty row(s) skipped",
            ctx.path.display(),
            ctx.format,
            report.sheets.len(),
            report.rows(),
            report.skipped_rows()
        );
        for sheet in &report.sheets {
            log::debug!(
                target: LOG_TARGET,
                "{}: sheet '{}' has {} column(s), {} row(s), {} empty row(s) skipped",
                ctx.path.display(),
                sheet.name,
                sheet.columns,
                sheet.rows,
                sheet.skipped_rows
            );
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CopyError) {
        log::log!(
            target: LOG_TARGET,
            severity.log_level(),
            "failed to load {} ({:?}): {error}",
            ctx.path.display(),
            ctx.format
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CopyError) {
        log::error!(
            target: LOG_TARGET,
            "[alert] {severity:?} failure loading {}: {error}",
            ctx.path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, Once};

    use log::{Log, Metadata, Record};

    static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
    static INIT: Once = Once::new();

    struct Capture;

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.target() == LOG_TARGET
        }

        fn log(&self, record: &Record<'_>) {
            if self.enabled(record.metadata()) {
                RECORDS
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;

    fn capture() {
        INIT.call_once(|| {
            let _ = log::set_logger(&CAPTURE);
            log::set_max_level(log::LevelFilter::Trace);
        });
    }

    fn records_for(path: &str) -> Vec<(Level, String)> {
        RECORDS
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, msg)| msg.contains(path))
            .cloned()
            .collect()
    }

    fn ctx(path: &str) -> LoadContext {
        LoadContext {
            path: PathBuf::from(path),
            format: LoadFormat::Csv,
        }
    }

    #[test]
    fn report_totals_across_sheets() {
        let report = LoadReport {
            sheets: vec![
                SheetReport {
                    name: "content".into(),
                    columns: 2,
                    rows: 4,
                    skipped_rows: 1,
                },
                SheetReport {
                    name: "people".into(),
                    columns: 3,
                    rows: 2,
                    skipped_rows: 0,
                },
            ],
        };
        assert_eq!(report.rows(), 6);
        assert_eq!(report.skipped_rows(), 1);
        assert_eq!(report.sheet("people").map(|s| s.columns), Some(3));
        assert!(report.sheet("missing").is_none());
    }

    #[test]
    fn severity_follows_error_kind() {
        let missing = CopyError::SourceMissing {
            path: PathBuf::from("copy.xlsx"),
        };
        let invalid = CopyError::InvalidSource {
            message: "duplicate sheet name 'a'".into(),
        };
        assert_eq!(LoadSeverity::for_error(&missing), LoadSeverity::Critical);
        assert_eq!(LoadSeverity::for_error(&invalid), LoadSeverity::Error);
        assert!(LoadSeverity::Critical > LoadSeverity::Error);
        assert_eq!(LoadSeverity::Error.log_level(), Level::Warn);
    }

    #[test]
    fn log_observer_writes_summary_and_per_sheet_lines() {
        capture();
        let report = LoadReport {
            sheets: vec![SheetReport {
                name: "content".into(),
                columns: 2,
                rows: 4,
                skipped_rows: 1,
            }],
        };
        LogObserver.on_success(&ctx("obs-success.csv"), &report);

        let records = records_for("obs-success.csv");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, Level::Info);
        assert!(records[0].1.contains("1 sheet(s), 4 row(s), 1 empty row(s) skipped"));
        assert_eq!(records[1].0, Level::Debug);
        assert!(records[1].1.contains("sheet 'content' has 2 column(s)"));
    }

    #[test]
    fn log_observer_grades_failures() {
        capture();
        let err = CopyError::InvalidSource {
            message: "duplicate column 'key'".into(),
        };
        LogObserver.on_failure(&ctx("obs-invalid.csv"), LoadSeverity::Error, &err);
        LogObserver.on_alert(&ctx("obs-invalid.csv"), LoadSeverity::Error, &err);

        let records = records_for("obs-invalid.csv");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, Level::Warn);
        assert!(records[0].1.contains("duplicate column 'key'"));
        assert_eq!(records[1].0, Level::Error);
        assert!(records[1].1.starts_with("[alert] Error"));
    }
}
