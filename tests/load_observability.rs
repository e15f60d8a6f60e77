use std::sync::{Arc, Mutex};

use copytext::load::{
    load_from_path, CompositeObserver, CopyOptions, LoadContext, LoadObserver, LoadReport,
    LoadSeverity, LogObserver,
};
use copytext::CopyError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadReport>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, report: &LoadReport) {
        self.successes.lock().unwrap().push(report.clone());
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &CopyError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &CopyError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn opts_with(obs: Arc<dyn LoadObserver>) -> CopyOptions {
    CopyOptions {
        observer: Some(obs),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_per_sheet_report_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    load_from_path("tests/fixtures/attribution.csv", &opts_with(obs.clone())).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes.len(), 1);
    let report = &successes[0];
    assert_eq!(report.sheets.len(), 1);
    assert_eq!(report.rows(), 3);

    let sheet = report.sheet("attribution").unwrap();
    assert_eq!(sheet.columns, 2);
    assert_eq!(sheet.rows, 3);
    assert_eq!(sheet.skipped_rows, 1);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_source() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts_with(obs.clone()))
        .unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![LoadSeverity::Critical]);
    assert_eq!(alerts, vec![LoadSeverity::Critical]);
}

#[test]
fn unreadable_source_is_critical() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = CopyOptions {
        format: Some(copytext::load::LoadFormat::Csv),
        ..opts_with(obs.clone())
    };
    let err = load_from_path("tests/fixtures", &opts).unwrap_err();

    assert!(matches!(err, CopyError::SourceUnreadable { .. }));
    assert!(err.to_string().contains("Regenerate or download"));
    assert_eq!(*obs.alerts.lock().unwrap(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = load_from_path(
        "tests/fixtures/duplicate_columns.csv",
        &opts_with(obs.clone()),
    )
    .unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn composite_observer_fans_out() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![
        first.clone() as Arc<dyn LoadObserver>,
        second.clone() as Arc<dyn LoadObserver>,
        Arc::new(LogObserver) as Arc<dyn LoadObserver>,
    ]);
    let opts = opts_with(Arc::new(composite));

    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();
    load_from_path("tests/fixtures/items.csv", &opts).unwrap();

    for obs in [&first, &second] {
        assert_eq!(*obs.alerts.lock().unwrap(), vec![LoadSeverity::Critical]);
        assert_eq!(obs.successes.lock().unwrap().len(), 1);
    }
}
