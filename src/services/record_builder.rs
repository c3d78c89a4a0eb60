//! Generic record construction and in-place refresh.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::events::{EventSink, TracingSink};
use crate::formatter::DateFormatter;
use crate::host::{find_test_action, EnvVars, Execution, NodeBoundExecution};
use crate::models::{BuildRecord, Latch};
use crate::services::{node_bound, self_contained, test_extraction};

/// Host and label used when no worker node can be resolved.
pub const MASTER: &str = "master";

/// Builds records against a date formatter and an event sink.
pub struct RecordBuilder<'a> {
    formatter: &'a dyn DateFormatter,
    sink: &'a dyn EventSink,
}

impl<'a> RecordBuilder<'a> {
    /// Builder whose absorbed failures are logged through `tracing`.
    pub fn new(formatter: &'a dyn DateFormatter) -> Self {
        Self {
            formatter,
            sink: &TracingSink,
        }
    }

    /// Builder reporting absorbed failures to `sink`.
    pub fn with_sink(formatter: &'a dyn DateFormatter, sink: &'a dyn EventSink) -> Self {
        Self { formatter, sink }
    }

    /// Generic record: identity, placement, timing and whatever outcome/tests exist now.
    ///
    /// `reference_time` is "now" for the caller; the duration is measured against it
    /// because the host's own duration is not final while the execution runs.
    pub fn build(&self, execution: &dyn Execution, reference_time: DateTime<Utc>) -> BuildRecord {
        let (build_host, build_label) = resolve_placement(execution);

        let mut record = BuildRecord {
            id: execution.id().to_string(),
            result: Latch::Unset,
            project_name: execution.project_name().to_string(),
            full_project_name: execution.full_project_name().to_string(),
            display_name: execution.display_name().to_string(),
            full_display_name: execution.full_display_name().to_string(),
            description: execution.description().map(str::to_string),
            url: execution.url().to_string(),
            build_host,
            build_label,
            build_num: execution.number(),
            build_duration: (reference_time - execution.start_time()).num_milliseconds(),
            timestamp: self.formatter.format(execution.timestamp()),
            root: None,
            build_variables: EnvVars::new(),
            sensitive_build_variables: None,
            test_results: Latch::Unset,
        };

        debug!(
            "Created build record for {} on {}",
            record.full_display_name, record.build_host
        );

        record.update(execution);
        record
    }

    /// Record for a node-bound execution: hierarchy root, merged variables, redaction.
    pub fn build_node_bound(
        &self,
        execution: &dyn NodeBoundExecution,
        reference_time: DateTime<Utc>,
    ) -> BuildRecord {
        let mut record = self.build(execution, reference_time);
        node_bound::apply(&mut record, execution, self.sink);
        record
    }

    /// Record for an execution that resolves its own environment. Nothing is redacted.
    pub fn build_self_contained(
        &self,
        execution: &dyn Execution,
        reference_time: DateTime<Utc>,
    ) -> BuildRecord {
        let mut record = self.build(execution, reference_time);
        self_contained::apply(&mut record, execution, self.sink);
        record
    }
}

impl BuildRecord {
    /// Refresh the outcome and test summary from the execution's current state.
    ///
    /// Each field is written at most once; values already present are never replaced,
    /// even if the execution has since changed.
    pub fn update(&mut self, execution: &dyn Execution) {
        if let Some(outcome) = execution.outcome()
            && self.result.set_once(outcome.to_string())
        {
            debug!("Recorded result {} for {}", outcome, self.full_display_name);
        }

        let attached = self.test_results.set_once_with(|| {
            find_test_action(execution)
                .map(|action| test_extraction::extract_test_summary(Some(action)))
        });
        if attached {
            debug!("Attached test results to {}", self.full_display_name);
        }
    }
}

/// Resolve `(build_host, build_label)` from the executor's node, falling back to
/// [`MASTER`] for anything missing or blank.
pub fn resolve_placement(execution: &dyn Execution) -> (String, String) {
    let Some(node) = execution.executor().and_then(|executor| executor.node()) else {
        return (MASTER.to_string(), MASTER.to_string());
    };
    (
        non_blank_or_master(node.display_name()),
        non_blank_or_master(node.label_string()),
    )
}

fn non_blank_or_master(value: &str) -> String {
    if value.trim().is_empty() {
        MASTER.to_string()
    } else {
        value.to_string()
    }
}
