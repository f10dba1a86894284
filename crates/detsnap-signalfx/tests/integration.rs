//! Integration tests for detsnap-signalfx
//!
//! The live tests talk to a real Splunk Observability Cloud org and are
//! marked #[ignore] by default. They read the token from SFX_TOKEN (and
//! the realm from SFX_REALM, falling back to us0).
//! Run with: cargo test -p detsnap-signalfx --test integration -- --ignored

use detsnap_signalfx::{Client, Detector, Exporter, SUMMARY_FILENAME};
use tempfile::TempDir;

fn detector(json: &str) -> Detector {
    serde_json::from_str(json).expect("valid detector json")
}

fn yaml_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "yaml"))
        .collect()
}

#[test]
fn export_batch_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let detectors = vec![
        detector(r#"{"id":"d1","name":"CPU High","createdOn":1,"rules":[{"severity":"Critical"}]}"#),
        detector(r#"{"id":"d2","name":"Memory Low","lastUpdatedOn":2,"rules":[]}"#),
        detector(r#"{"id":"d3","name":"Disk Full","createdBy":"someone","rules":[]}"#),
    ];

    let exporter = Exporter::new(temp_dir.path()).expect("Exporter should initialize");
    let written = exporter.export_all(&detectors);
    assert_eq!(written.len(), 3);

    let summary_path = exporter
        .write_summary(&detectors, &written)
        .expect("Summary should be written");
    assert_eq!(summary_path, temp_dir.path().join(SUMMARY_FILENAME));

    // 3 detector documents + 1 summary
    assert_eq!(yaml_files(temp_dir.path()).len(), 4);

    let doc: serde_yaml::Value = serde_yaml::from_str(
        &std::fs::read_to_string(temp_dir.path().join("CPU_High.yaml")).unwrap(),
    )
    .unwrap();
    assert_eq!(doc["metadata"]["original_id"].as_str(), Some("d1"));
    assert_eq!(doc["detector"]["name"].as_str(), Some("CPU High"));
    assert!(doc["detector"].get("createdOn").is_none());

    let summary: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary["export_summary"]["total_detectors"].as_u64(), Some(3));
    assert_eq!(
        summary["export_summary"]["successfully_exported"].as_u64(),
        Some(3)
    );
    assert_eq!(summary["export_summary"]["failed_exports"].as_u64(), Some(0));
    assert_eq!(summary["exported_files"].as_sequence().unwrap().len(), 3);
    assert_eq!(summary["detector_names"].as_sequence().unwrap().len(), 3);
}

#[test]
fn failed_record_is_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let detectors = vec![
        detector(r#"{"id":"d1","name":"First"}"#),
        detector(r#"{"id":"d2","name":"Bad Detector"}"#),
        detector(r#"{"id":"d3","name":"Third"}"#),
    ];

    let exporter = Exporter::new(temp_dir.path()).expect("Exporter should initialize");
    // A directory squatting on the target filename makes that one write fail.
    std::fs::create_dir(temp_dir.path().join("Bad_Detector.yaml")).unwrap();

    let written = exporter.export_all(&detectors);
    assert_eq!(written.len(), 2);
    assert!(temp_dir.path().join("First.yaml").is_file());
    assert!(temp_dir.path().join("Third.yaml").is_file());

    let summary_path = exporter
        .write_summary(&detectors, &written)
        .expect("Summary should be written");
    let summary: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary["export_summary"]["total_detectors"].as_u64(), Some(3));
    assert_eq!(
        summary["export_summary"]["successfully_exported"].as_u64(),
        Some(2)
    );
    assert_eq!(summary["export_summary"]["failed_exports"].as_u64(), Some(1));
    // Attempted names still all appear, the failed one included.
    let names: Vec<&str> = summary["detector_names"]
        .as_sequence()
        .unwrap()
        .iter()
        .filter_map(|n| n.as_str())
        .collect();
    assert_eq!(names, vec!["First", "Bad Detector", "Third"]);
}

#[test]
fn colliding_names_leave_the_later_document() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let detectors = vec![
        detector(r#"{"id":"d1","name":"Same Name","marker":"first"}"#),
        detector(r#"{"id":"d2","name":"Same Name","marker":"second"}"#),
    ];

    let exporter = Exporter::new(temp_dir.path()).expect("Exporter should initialize");
    let written = exporter.export_all(&detectors);

    // Both writes succeed; the later one wins on disk.
    assert_eq!(written.len(), 2);
    let doc: serde_yaml::Value = serde_yaml::from_str(
        &std::fs::read_to_string(temp_dir.path().join("Same_Name.yaml")).unwrap(),
    )
    .unwrap();
    assert_eq!(doc["metadata"]["original_id"].as_str(), Some("d2"));
    assert_eq!(doc["detector"]["marker"].as_str(), Some("second"));
}

#[test]
fn unnamed_detector_gets_fallback_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let detectors = vec![detector(r#"{"id":"d1","rules":[]}"#)];

    let exporter = Exporter::new(temp_dir.path()).expect("Exporter should initialize");
    let written = exporter.export_all(&detectors);
    assert_eq!(written, vec![temp_dir.path().join("unnamed.yaml")]);

    let summary_path = exporter.write_summary(&detectors, &written).unwrap();
    let summary: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&summary_path).unwrap()).unwrap();
    let names = summary["detector_names"].as_sequence().unwrap();
    assert!(names[0].is_null());
}

/// Probe a live org with a single-record request
/// Run with: cargo test -p detsnap-signalfx --test integration -- --ignored live_probe
#[test]
#[ignore]
fn live_probe() {
    let token = std::env::var("SFX_TOKEN").expect("SFX_TOKEN must be set");
    let realm = std::env::var("SFX_REALM").unwrap_or_else(|_| "us0".to_string());

    let client = Client::new(&token, &realm);
    assert!(client.probe(), "Probe against {} should succeed", client.base_url());
}

/// Export a couple of real detectors end to end
/// Run with: cargo test -p detsnap-signalfx --test integration -- --ignored live_export_limited
#[test]
#[ignore]
fn live_export_limited() {
    let token = std::env::var("SFX_TOKEN").expect("SFX_TOKEN must be set");
    let realm = std::env::var("SFX_REALM").unwrap_or_else(|_| "us0".to_string());
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let config = detsnap_signalfx::Config {
        token,
        realm,
        output_dir: temp_dir.path().to_path_buf(),
        limit: Some(2),
    };

    let summary = detsnap_signalfx::run(&config).expect("Export should succeed");
    assert!(summary.total_detectors <= 2);
    assert_eq!(summary.failed, 0);

    if !summary.is_empty() {
        assert!(temp_dir.path().join(SUMMARY_FILENAME).is_file());
        // One document per detector plus the summary.
        assert_eq!(yaml_files(temp_dir.path()).len(), summary.exported + 1);
    }
}
