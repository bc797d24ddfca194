//! End-to-end: file on disk → dashboard → current-report slot.

use std::path::Path;
use std::sync::Arc;

use dash_core::Metric;
use dash_io::{LoadError, LoaderConfig, Origin, SourceSpec, TransportError};
use dash_pipeline::{load_dashboard, reload, PipelineError, ReportSlot};
use dash_view::Tab;

const V2_FIXTURE: &str = include_str!("../../dash_io/tests/fixtures/ml_project_complete_results.json");

fn cfg_for(path: &Path) -> LoaderConfig {
    LoaderConfig { source: SourceSpec::File(path.to_path_buf()), ..LoaderConfig::default() }
}

#[tokio::test]
async fn v2_artifact_builds_full_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ml_project_complete_results.json");
    std::fs::write(&path, V2_FIXTURE).unwrap();

    let d = load_dashboard(&cfg_for(&path), &[]).await.unwrap();
    assert!(matches!(d.origin, Origin::Artifact(_)));
    assert!(d.quality.is_clean(), "unexpected issues: {:?}", d.quality.issues);
    assert_eq!(d.views.views.len(), 6);
    assert_eq!(d.derived.leader(Metric::RocAuc).unwrap().model, "ExtraTrees");
    assert_eq!(d.derived.ranked[0].result.model, "LogisticRegression");
    assert_eq!(d.derived.models_meeting_target, 1);
}

#[tokio::test]
async fn missing_artifact_shows_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let d = load_dashboard(&cfg_for(&dir.path().join("nope.json")), &[Tab::Overview]).await.unwrap();
    assert!(matches!(d.origin, Origin::Fallback { cause: TransportError::Unavailable(_) }));
    assert_eq!(d.views.views.len(), 1);
    assert_eq!(d.views.header.models_trained, 5);
}

#[tokio::test]
async fn malformed_json_is_surfaced_and_slot_keeps_previous() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");
    std::fs::write(&good, V2_FIXTURE).unwrap();
    std::fs::write(&bad, b"{\"project\": ").unwrap();

    let slot = ReportSlot::new();
    reload(&slot, &cfg_for(&good), &[]).await.unwrap();
    let before = slot.current().unwrap();

    let err = reload(&slot, &cfg_for(&bad), &[]).await.unwrap_err();
    assert!(matches!(err, PipelineError::Load(LoadError::Parse { .. })));
    assert!(err.is_data_error());

    let after = slot.current().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn replace_swaps_whole_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    std::fs::write(&good, V2_FIXTURE).unwrap();

    let slot = ReportSlot::new();
    assert!(slot.current().is_none());

    reload(&slot, &cfg_for(&dir.path().join("absent.json")), &[]).await.unwrap();
    let first = slot.current().unwrap();
    assert!(first.origin.is_fallback());

    reload(&slot, &cfg_for(&good), &[]).await.unwrap();
    let second = slot.current().unwrap();
    assert!(!second.origin.is_fallback());

    // A reader holding the old Arc still sees the complete old dashboard.
    assert_eq!(first.derived.ranked.len(), 5);
    assert_eq!(second.derived.ranked.len(), 3);
}
