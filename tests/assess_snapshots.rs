use std::path::{Path, PathBuf};

use kubeposture::output::OutputFormat;
use kubeposture::{assess, load_findings, render_report, AssessOptions};
use pretty_assertions::assert_eq;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn defaults() -> AssessOptions {
    AssessOptions {
        config_path: Some(fixtures().join("absent.toml")),
        ..Default::default()
    }
}

#[test]
fn findings_file_feeds_the_adapter() {
    let extra = load_findings(&fixtures().join("findings/kube-bench.txt")).unwrap();
    assert_eq!(extra.len(), 2);

    let options = AssessOptions {
        extra_findings: extra,
        ..defaults()
    };
    let report = assess(&fixtures().join("snapshots/hardened.json"), &options).unwrap();
    let names: Vec<_> = report.signals.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["HighFindingsPresent", "MediumFindingsPresent"]);
    // sqrt(10^2 + 5^2) * 1.5
    assert_eq!(report.score, 16);
}

#[test]
fn config_next_to_snapshot_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("cluster.json");
    std::fs::copy(fixtures().join("snapshots/noisy_rbac.json"), &snapshot).unwrap();
    std::fs::write(
        dir.path().join(".kubeposture.toml"),
        "[policy]\nignore_signals = [\"WildcardRBAC\"]\n",
    )
    .unwrap();

    let report = assess(&snapshot, &AssessOptions::default()).unwrap();
    assert_eq!(report.score, 0);
    assert!(report.verdict.pass);
    assert_eq!(report.verdict.total_signals, 3);
    assert_eq!(report.verdict.effective_signals, 0);
}

#[test]
fn malformed_snapshot_is_reported_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("broken.json");
    std::fs::write(&snapshot, "{\"pods\": [").unwrap();
    let err = assess(&snapshot, &defaults()).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn json_rendering_carries_run_metadata() {
    let report = assess(&fixtures().join("snapshots/escalation.json"), &defaults()).unwrap();
    let json = render_report(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["score"], 76);
    assert_eq!(value["verdict"]["pass"], false);
    assert_eq!(value["attack_paths"][0]["id"], "pod-to-cluster-admin");
    assert!(value["run_id"].is_string());
    assert!(value["generated_at"].is_string());
    assert_eq!(value["snapshot_digest"].as_str().unwrap().len(), 64);
}
