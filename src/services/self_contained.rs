//! Enrichment for executions that resolve their own environment.
//!
//! Every execution is treated as its own root. Variables come from a single environment
//! lookup and are NOT redacted: the host exposes no sensitive-name set for these
//! executions, so callers must not assume secrets are filtered.

use crate::events::{BuilderVariant, EventSink, RecordEvent};
use crate::host::{EnvVars, Execution};
use crate::models::{BuildRecord, RootExecution};

/// Apply self-rooted identity and the resolved environment to a generic record.
pub fn apply(record: &mut BuildRecord, execution: &dyn Execution, sink: &dyn EventSink) {
    record.root = Some(RootExecution {
        root_project_name: record.project_name.clone(),
        root_full_project_name: record.full_project_name.clone(),
        root_project_display_name: record.display_name.clone(),
        root_build_num: record.build_num,
    });

    record.build_variables = match execution.environment() {
        Ok(environment) => environment,
        Err(e) => {
            sink.emit(RecordEvent::environment_unavailable(
                execution.display_name(),
                BuilderVariant::SelfContained,
                e.to_string(),
            ));
            EnvVars::new()
        }
    };
}
