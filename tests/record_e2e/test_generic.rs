//! E2E tests: generic record fields and the update lifecycle.

use ci_build_record::host::snapshot::{ExecutorSnapshot, TestReportSnapshot};
use ci_build_record::models::BuildOutcome;
use ci_build_record::services::MASTER;

use super::test_helpers::*;

#[test]
fn test_no_executor_no_tests() {
    let mut snapshot = load_fixture("pipeline_env_failure.json");
    snapshot.environment_error = None;
    let (record, _) = build_with_events(&snapshot, Variant::Generic, after_start(&snapshot, 0));

    assert_eq!(record.build_host(), MASTER);
    assert_eq!(record.build_label(), MASTER);
    assert!(record.test_results().is_none());
    assert!(record.result().is_none());
}

#[test]
fn test_placement_and_timing_from_fixture() {
    let snapshot = load_fixture("freestyle_on_agent.json");
    let (record, _) =
        build_with_events(&snapshot, Variant::Generic, after_start(&snapshot, 125_500));

    assert_eq!(record.build_host(), "linux-agent-04");
    assert_eq!(record.build_label(), "linux docker");
    assert_eq!(record.build_duration(), 125_500);
    // Scheduled time, not start time.
    assert_eq!(record.timestamp(), "2024-05-10T07:59:58.000+0000");
    assert_eq!(record.result(), Some("UNSTABLE"));
}

#[test]
fn test_test_summary_from_fixture() {
    let snapshot = load_fixture("freestyle_on_agent.json");
    let (record, _) = build_with_events(&snapshot, Variant::Generic, after_start(&snapshot, 0));

    let summary = record.test_results().expect("test report is attached");
    assert_eq!(summary.total_count, 10);
    assert_eq!(summary.skip_count, 2);
    assert_eq!(summary.fail_count, 1);
    assert_eq!(summary.pass_count, 7);
    assert_eq!(summary.failed_tests, vec!["backend.OrderServiceTest.refund_twice"]);
    assert_eq!(
        summary.failed_tests_with_error_detail[0].error_details.as_deref(),
        Some("expected 409 but was 200")
    );
}

#[test]
fn test_lifecycle_running_then_completed() {
    let mut snapshot = load_fixture("pipeline_env_failure.json");
    snapshot.executor = Some(ExecutorSnapshot { node: None });
    let (mut record, _) =
        build_with_events(&snapshot, Variant::SelfContained, after_start(&snapshot, 10));
    assert!(record.result().is_none());
    assert!(record.test_results().is_none());

    snapshot.outcome = Some(BuildOutcome::Failure);
    snapshot.test_report = Some(TestReportSnapshot {
        total_count: 4,
        skip_count: 0,
        fail_count: 0,
        failed_tests: Vec::new(),
    });
    record.update(&snapshot);
    assert_eq!(record.result(), Some("FAILURE"));
    assert_eq!(record.test_results().map(|t| t.pass_count), Some(4));

    // A late change on the host does not leak into a finished record.
    snapshot.outcome = Some(BuildOutcome::Success);
    snapshot.test_report = None;
    let settled = record.clone();
    record.update(&snapshot);
    assert_eq!(record, settled);
}
