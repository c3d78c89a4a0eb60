//! E2E tests: JSON shape handed to the shipper.

use std::io::Write;

use ci_build_record::host::ExecutionSnapshot;
use ci_build_record::RecordError;

use super::test_helpers::*;

#[test]
fn test_node_bound_json_shape() {
    let snapshot = load_fixture("freestyle_on_agent.json");
    let (record, _) =
        build_with_events(&snapshot, Variant::NodeBound, after_start(&snapshot, 2_000));
    let json = record.to_json().unwrap();

    assert_eq!(json["id"], "318");
    assert_eq!(json["projectName"], "integration");
    assert_eq!(json["fullDisplayName"], "backend » integration #318");
    assert_eq!(json["buildNum"], 318);
    assert_eq!(json["buildDuration"], 2_000);
    assert_eq!(json["result"], "UNSTABLE");
    assert_eq!(json["rootBuildNum"], 77);
    assert_eq!(json["buildVariables"]["C"], "4");
    assert_eq!(json["testResults"]["passCount"], 7);
    assert_eq!(
        json["testResults"]["failedTestsWithErrorDetail"][0]["fullName"],
        "backend.OrderServiceTest.refund_twice"
    );
    assert!(
        json["sensitiveBuildVariables"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "DEPLOY_TOKEN")
    );
}

#[test]
fn test_pending_record_omits_unset_fields() {
    let snapshot = load_fixture("pipeline_env_failure.json");
    let (record, _) = build_with_events(&snapshot, Variant::Generic, after_start(&snapshot, 0));
    let json = record.to_json().unwrap();
    let obj = json.as_object().unwrap();

    for absent in [
        "result",
        "testResults",
        "description",
        "rootProjectName",
        "rootBuildNum",
        "sensitiveBuildVariables",
    ] {
        assert!(!obj.contains_key(absent), "{} should be omitted", absent);
    }
    assert_eq!(obj["buildHost"], "master");
}

#[test]
fn test_snapshot_loaded_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"id":"9","projectName":"lint","number":9,"startTime":"2024-05-10T10:00:00Z","outcome":"SUCCESS"}}"#
    )
    .unwrap();

    let snapshot = ExecutionSnapshot::from_path(file.path()).unwrap();
    let (record, _) = build_with_events(&snapshot, Variant::Generic, after_start(&snapshot, 0));
    assert_eq!(record.result(), Some("SUCCESS"));
    assert_eq!(record.to_string(), record.to_json_string().unwrap());
}

#[test]
fn test_missing_snapshot_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ExecutionSnapshot::from_path(&dir.path().join("missing.json"));
    assert!(matches!(result, Err(RecordError::Io(_))));
}
