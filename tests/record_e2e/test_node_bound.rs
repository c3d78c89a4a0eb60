//! E2E tests: node-bound builder merge order and redaction.

use ci_build_record::events::{BuilderVariant, RecordEvent};

use super::test_helpers::*;

#[test]
fn test_merge_and_redaction_scenario() {
    let snapshot = load_fixture("freestyle_on_agent.json");
    let (record, events) =
        build_with_events(&snapshot, Variant::NodeBound, after_start(&snapshot, 0));

    // B came from a contribution and is sensitive; A was overridden by the environment.
    assert_eq!(record.build_variables(), &vars(&[("A", "3"), ("C", "4")]));
    assert!(events.is_empty());
}

#[test]
fn test_sensitive_names_never_survive() {
    let snapshot = load_fixture("freestyle_on_agent.json");
    let (record, _) = build_with_events(&snapshot, Variant::NodeBound, after_start(&snapshot, 0));

    let sensitive = record
        .sensitive_build_variables()
        .expect("node-bound records carry the sensitive set");
    for key in sensitive {
        assert!(
            !record.build_variables().contains_key(key),
            "{} should have been redacted",
            key
        );
    }
}

#[test]
fn test_root_fields_come_from_ancestor() {
    let snapshot = load_fixture("freestyle_on_agent.json");
    let (record, _) = build_with_events(&snapshot, Variant::NodeBound, after_start(&snapshot, 0));

    let root = record.root().expect("root is set");
    assert_eq!(root.root_project_name, "release-train");
    assert_eq!(root.root_full_project_name, "release/release-train");
    assert_eq!(root.root_project_display_name, "#77");
    assert_eq!(root.root_build_num, 77);
}

#[test]
fn test_environment_failure_keeps_earlier_layers() {
    let mut snapshot = load_fixture("freestyle_on_agent.json");
    snapshot.environment_error = Some("agent disconnected".to_string());
    let (record, events) =
        build_with_events(&snapshot, Variant::NodeBound, after_start(&snapshot, 0));

    assert_eq!(record.build_variables(), &vars(&[("A", "1")]));
    assert_eq!(
        events.events(),
        vec![RecordEvent::environment_unavailable(
            "#318",
            BuilderVariant::NodeBound,
            "agent disconnected",
        )]
    );
}
