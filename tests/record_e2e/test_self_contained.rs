//! E2E tests: self-contained builder.

use ci_build_record::events::{BuilderVariant, RecordEvent};

use super::test_helpers::*;

#[test]
fn test_environment_failure_yields_empty_variables() {
    let snapshot = load_fixture("pipeline_env_failure.json");
    let (record, events) =
        build_with_events(&snapshot, Variant::SelfContained, after_start(&snapshot, 0));

    assert!(record.build_variables().is_empty());
    let events = events.events();
    assert_eq!(events.len(), 1);
    let RecordEvent::EnvironmentUnavailable(ref payload) = events[0];
    assert_eq!(payload.display_name, "#52");
    assert_eq!(payload.variant, BuilderVariant::SelfContained);
    assert_eq!(payload.cause, "environment lookup interrupted");
}

#[test]
fn test_environment_is_taken_verbatim() {
    let snapshot = load_fixture("freestyle_on_agent.json");
    let (record, _) =
        build_with_events(&snapshot, Variant::SelfContained, after_start(&snapshot, 0));

    // No contribution merge, no parameter merge, no redaction.
    assert_eq!(record.build_variables(), &vars(&[("A", "3"), ("C", "4")]));
    assert!(record.sensitive_build_variables().is_none());
}

#[test]
fn test_root_is_own_identity() {
    let snapshot = load_fixture("freestyle_on_agent.json");
    let (record, _) =
        build_with_events(&snapshot, Variant::SelfContained, after_start(&snapshot, 0));

    let root = record.root().expect("root is set");
    assert_eq!(root.root_project_name, "integration");
    assert_eq!(root.root_full_project_name, "backend/integration");
    assert_eq!(root.root_project_display_name, "#318");
    assert_eq!(root.root_build_num, 318);
}
