//! Enrichment for executions bound to a worker node.
//!
//! Variables are merged in three layers, later layers winning on key collisions:
//! execution-local variables, each environment contribution in declared order, then the
//! resolved process environment. Sensitive names are removed after the last merge.

use std::collections::BTreeSet;

use crate::events::{BuilderVariant, EventSink, RecordEvent};
use crate::host::{EnvVars, NodeBoundExecution};
use crate::models::{BuildRecord, RootExecution};

/// Apply root identity, merged variables and redaction to a generic record.
pub fn apply(record: &mut BuildRecord, execution: &dyn NodeBoundExecution, sink: &dyn EventSink) {
    let root = execution.root_execution();
    record.root = Some(RootExecution {
        root_project_name: root.project_name().to_string(),
        root_full_project_name: root.full_project_name().to_string(),
        root_project_display_name: root.display_name().to_string(),
        root_build_num: root.number(),
    });

    let sensitive = execution.sensitive_build_variables();
    let mut variables = merge_variables(execution, sink);
    redact(&mut variables, &sensitive);

    record.build_variables = variables;
    record.sensitive_build_variables = Some(sensitive);
}

/// Merge the three variable layers. Environment resolution failures are reported and skipped.
pub fn merge_variables(execution: &dyn NodeBoundExecution, sink: &dyn EventSink) -> EnvVars {
    let mut variables = execution.build_variables();

    // Each contribution is flushed before the next one runs.
    let mut contributed = EnvVars::new();
    for contribution in execution.environment_contributions() {
        contribution.contribute(&mut contributed);
        if !contributed.is_empty() {
            variables.append(&mut contributed);
        }
    }

    match execution.environment() {
        Ok(environment) => variables.extend(environment),
        Err(e) => sink.emit(RecordEvent::environment_unavailable(
            execution.display_name(),
            BuilderVariant::NodeBound,
            e.to_string(),
        )),
    }

    variables
}

/// Remove every sensitive key.
pub fn redact(variables: &mut EnvVars, sensitive: &BTreeSet<String>) {
    variables.retain(|key, _| !sensitive.contains(key));
}
