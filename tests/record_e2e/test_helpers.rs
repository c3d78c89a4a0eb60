//! Shared helpers for record E2E tests.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use ci_build_record::events::CollectingSink;
use ci_build_record::formatter::StrftimeFormatter;
use ci_build_record::host::ExecutionSnapshot;
use ci_build_record::{BuildRecord, RecordBuilder};

/// Path of a fixture under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a fixture snapshot, panicking with the file name on failure.
pub fn load_fixture(name: &str) -> ExecutionSnapshot {
    ExecutionSnapshot::from_path(&fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {} failed to load: {}", name, e))
}

/// Reference time a fixed offset after the snapshot's start.
pub fn after_start(snapshot: &ExecutionSnapshot, millis: i64) -> DateTime<Utc> {
    snapshot.start_time + Duration::milliseconds(millis)
}

/// Which builder a helper should run.
#[derive(Debug, Clone, Copy)]
pub enum Variant {
    Generic,
    NodeBound,
    SelfContained,
}

/// Build a record with the default formatter, collecting absorbed failures.
pub fn build_with_events(
    snapshot: &ExecutionSnapshot,
    variant: Variant,
    reference_time: DateTime<Utc>,
) -> (BuildRecord, CollectingSink) {
    let formatter = StrftimeFormatter::default();
    let sink = CollectingSink::new();
    let record = {
        let builder = RecordBuilder::with_sink(&formatter, &sink);
        match variant {
            Variant::Generic => builder.build(snapshot, reference_time),
            Variant::NodeBound => builder.build_node_bound(snapshot, reference_time),
            Variant::SelfContained => builder.build_self_contained(snapshot, reference_time),
        }
    };
    (record, sink)
}

/// String map from literal pairs.
pub fn vars(pairs: &[(&str, &str)]) -> ci_build_record::host::EnvVars {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
