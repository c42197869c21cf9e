//! Snapshot files on disk through the full pipeline.

use std::fs;

use tempfile::TempDir;

use factor_insight::adapters::{load_snapshot, SnapshotError};
use factor_insight::application::{AnalysisCache, ViewpointAnalysis};
use factor_insight::config::AnalysisConfig;
use factor_insight::domain::foundation::{AnalysisError, FactorId};

const STUDY_JSON: &str = r#"{
    "factors": [
        {"id": 1, "eigenvalue": 4.1, "variance_explained": 24.0, "loadings": [2.7, -0.4, 0.2, 2.3, -2.6]},
        {"id": 2, "eigenvalue": 2.9, "variance_explained": 17.5, "loadings": [2.5, 0.3, -0.1, -2.4, 2.6]}
    ],
    "statements": [
        {"id": 1, "text": "Public transit deserves more funding"},
        {"id": 2, "text": "Parking should be free"},
        {"id": 3, "text": "Bike lanes slow traffic"},
        {"id": 4, "text": "Road tolls are fair"},
        {"id": 5, "text": "Cars are essential"}
    ],
    "themes": {"1": "Transit advocates"}
}"#;

const STUDY_YAML: &str = r#"
factors:
  - id: 1
    loadings: [2.0, 1.0, 0.0, -1.0, -2.0]
  - id: 2
    loadings: [1.8, 1.2, 0.1, -0.9, -2.1]
  - id: 3
    loadings: [-2.0, -0.8, 0.2, 1.1, 1.9]
statements:
  - {id: 1, text: Heritage sites need protection}
  - {id: 2, text: New housing beats preservation}
  - {id: 3, text: Neighbourhoods should decide}
  - {id: 4, text: The city should decide}
  - {id: 5, text: Growth is inevitable}
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn json_file_runs_through_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "study.json", STUDY_JSON);

    let snapshot = load_snapshot(&path).unwrap();
    assert_eq!(snapshot.factor_count(), 2);
    assert_eq!(snapshot.statement_count(), 5);

    let report = ViewpointAnalysis::run(&snapshot, &AnalysisConfig::default(), None).unwrap();
    let cluster = report.cluster_of(FactorId::new(1)).unwrap();
    assert_eq!(cluster.theme, "Transit advocates");

    let contrast = ViewpointAnalysis::contrast(&report, FactorId::new(1), FactorId::new(2)).unwrap();
    assert_eq!(contrast.key_difference, "Cars are essential");
}

#[test]
fn yaml_file_runs_through_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "study.yml", STUDY_YAML);

    let snapshot = load_snapshot(&path).unwrap();
    let report = ViewpointAnalysis::run(&snapshot, &AnalysisConfig::default(), None).unwrap();

    let camp = report.cluster_of(FactorId::new(1)).unwrap();
    assert!(camp.contains(FactorId::new(2)));
    assert!(!camp.contains(FactorId::new(3)));
}

#[test]
fn cached_report_matches_fresh_run() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "study.json", STUDY_JSON);
    let snapshot = load_snapshot(&path).unwrap();
    let config = AnalysisConfig::default();

    let cache = AnalysisCache::new();
    let cached = cache.get_or_compute(&snapshot, &config).unwrap();
    let fresh = ViewpointAnalysis::run(&snapshot, &config, None).unwrap();

    assert_eq!(*cached, fresh);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_snapshot(dir.path().join("absent.json")).unwrap_err();

    match err {
        SnapshotError::Io { path, .. } => assert!(path.ends_with("absent.json")),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn inconsistent_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "broken.yaml",
        r#"
factors:
  - id: 1
    loadings: [1.0, 2.0]
  - id: 2
    loadings: [1.0]
statements:
  - {id: 1, text: One}
  - {id: 2, text: Two}
"#,
    );

    let err = load_snapshot(&path).unwrap_err();
    match err {
        SnapshotError::Invalid(AnalysisError::DataInconsistency { factor_ids, .. }) => {
            assert_eq!(factor_ids, vec![FactorId::new(2)]);
        }
        other => panic!("Expected DataInconsistency, got {:?}", other),
    }
}
