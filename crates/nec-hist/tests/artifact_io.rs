//! Integration tests: persisting a registry as a JSON artifact.

use nec_hist::{
    ARTIFACT_SCHEMA_VERSION, Axis, HistogramArtifact, HistogramRegistry, PendingArtifact,
    read_artifact, write_artifact,
};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn tmp_path(filename: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("nec_hist_{}_{}_{}", std::process::id(), nanos, filename));
    p
}

fn filled_registry() -> HistogramRegistry {
    let rap = Axis::new("y = ln tan(#theta/2)", 200, -15.0, 5.0).unwrap();
    let x = Axis::new("x_{B}", 60, -1.0, 2.0).unwrap();
    let mut reg = HistogramRegistry::new();
    let nec = reg.declare_1d("hNECVsRapRec", ";y = ln tan(#theta/2);#LTNEC#GT", &rap).unwrap();
    let xx = reg.declare_2d("hXBRecVsGen", "", &x, &x).unwrap();
    reg.fill_weighted(nec, -1.23, 0.25).unwrap();
    reg.fill_weighted(nec, f64::NEG_INFINITY, 0.5).unwrap();
    reg.fill2(xx, 0.1, 0.12).unwrap();
    reg
}

#[test]
fn artifact_keeps_histograms_by_name() {
    let path = tmp_path("hists.json");
    let artifact = HistogramArtifact::from_registry(
        filled_registry(),
        "nec",
        "0.0.0",
        Some("events.jsonl".into()),
        serde_json::json!({"min_q2": 0.0}),
    );
    write_artifact(&path, &artifact).expect("write artifact");

    let back = read_artifact(&path).expect("read artifact");
    assert_eq!(back.schema_version, ARTIFACT_SCHEMA_VERSION);
    assert_eq!(back, artifact);

    let nec = back.get("hNECVsRapRec").and_then(|h| h.as_1d()).expect("hNECVsRapRec");
    assert_eq!(nec.integral(), 0.25);
    assert_eq!(nec.underflow, 0.5);
    let xx = back.get("hXBRecVsGen").and_then(|h| h.as_2d()).expect("hXBRecVsGen");
    assert_eq!(xx.entries, 1);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["histograms"][0]["kind"], "1d");
    assert_eq!(raw["histograms"][1]["kind"], "2d");
    assert_eq!(raw["meta"]["run"]["min_q2"], 0.0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn dropped_pending_artifact_leaves_nothing_behind() {
    let path = tmp_path("never.json");
    let pending = PendingArtifact::create(&path).expect("create staging");
    let mut staging = path.clone().into_os_string();
    staging.push(".tmp");
    assert!(PathBuf::from(&staging).exists());
    drop(pending);
    assert!(!PathBuf::from(&staging).exists());
    assert!(!path.exists());
}

#[test]
fn pending_artifact_fails_for_missing_directory() {
    let path = tmp_path("no_such_dir").join("out.json");
    assert!(PendingArtifact::create(&path).is_err());
}
