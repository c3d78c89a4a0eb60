//! Build record: the flat document handed to log shipping.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{BuildOutcome, Latch, TestSummary};
use crate::error::RecordResult;
use crate::formatter::DateFormatter;
use crate::host::EnvVars;

/// Metadata extracted from one execution.
///
/// Created once per execution, refreshed with `update` while it runs, then serialized.
/// `result` and `test_results` are write-once: see [`Latch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    pub(crate) id: String,
    #[serde(skip_serializing_if = "Latch::is_unset")]
    pub(crate) result: Latch<String>,
    pub(crate) project_name: String,
    pub(crate) full_project_name: String,
    pub(crate) display_name: String,
    pub(crate) full_display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) url: String,
    pub(crate) build_host: String,
    pub(crate) build_label: String,
    pub(crate) build_num: u32,
    /// Milliseconds from start to the reference time. Negative if the reference is earlier.
    pub(crate) build_duration: i64,
    pub(crate) timestamp: String,
    #[serde(flatten)]
    pub(crate) root: Option<RootExecution>,
    pub(crate) build_variables: EnvVars,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sensitive_build_variables: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Latch::is_unset")]
    pub(crate) test_results: Latch<TestSummary>,
}

/// Identity of the top-most execution in a trigger hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootExecution {
    pub root_project_name: String,
    pub root_full_project_name: String,
    pub root_project_display_name: String,
    pub root_build_num: u32,
}

impl BuildRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Final outcome, once the execution reported one.
    pub fn result(&self) -> Option<&str> {
        self.result.get().map(String::as_str)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn full_project_name(&self) -> &str {
        &self.full_project_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn full_display_name(&self) -> &str {
        &self.full_display_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn build_host(&self) -> &str {
        &self.build_host
    }

    pub fn build_label(&self) -> &str {
        &self.build_label
    }

    pub fn build_num(&self) -> u32 {
        self.build_num
    }

    pub fn build_duration(&self) -> i64 {
        self.build_duration
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn root(&self) -> Option<&RootExecution> {
        self.root.as_ref()
    }

    pub fn build_variables(&self) -> &EnvVars {
        &self.build_variables
    }

    /// Only populated by the node-bound builder.
    pub fn sensitive_build_variables(&self) -> Option<&BTreeSet<String>> {
        self.sensitive_build_variables.as_ref()
    }

    pub fn test_results(&self) -> Option<&TestSummary> {
        self.test_results.get()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn set_project_name(&mut self, project_name: impl Into<String>) {
        self.project_name = project_name.into();
    }

    pub fn set_full_project_name(&mut self, full_project_name: impl Into<String>) {
        self.full_project_name = full_project_name.into();
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    pub fn set_full_display_name(&mut self, full_display_name: impl Into<String>) {
        self.full_display_name = full_display_name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_build_host(&mut self, build_host: impl Into<String>) {
        self.build_host = build_host.into();
    }

    pub fn set_build_label(&mut self, build_label: impl Into<String>) {
        self.build_label = build_label.into();
    }

    pub fn set_build_num(&mut self, build_num: u32) {
        self.build_num = build_num;
    }

    pub fn set_build_duration(&mut self, build_duration: i64) {
        self.build_duration = build_duration;
    }

    /// Re-render the timestamp with `formatter`.
    pub fn set_timestamp(&mut self, time: DateTime<Utc>, formatter: &dyn DateFormatter) {
        self.timestamp = formatter.format(time);
    }

    pub fn set_root(&mut self, root: Option<RootExecution>) {
        self.root = root;
    }

    pub fn set_build_variables(&mut self, build_variables: EnvVars) {
        self.build_variables = build_variables;
    }

    pub fn set_sensitive_build_variables(&mut self, sensitive: Option<BTreeSet<String>>) {
        self.sensitive_build_variables = sensitive;
    }

    /// Overwrite the result even if one is already recorded.
    ///
    /// `update` never does this; it exists for explicit corrections by the caller.
    pub fn force_result(&mut self, outcome: BuildOutcome) {
        self.result.replace(outcome.to_string());
    }

    /// Overwrite the test summary even if one is already recorded.
    pub fn force_test_results(&mut self, summary: TestSummary) {
        self.test_results.replace(summary);
    }

    /// Serialize to a JSON value for shipping.
    pub fn to_json(&self) -> RecordResult<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to a compact JSON string.
    pub fn to_json_string(&self) -> RecordResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to an indented JSON string.
    pub fn to_json_string_pretty(&self) -> RecordResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for BuildRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}
