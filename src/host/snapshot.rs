//! Static execution captured as JSON.
//!
//! Implements every host trait from plain data, so an execution can be recorded once
//! and replayed through the builders (the binary and the tests both do this).

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Action, EnvVars, EnvironmentContribution, Execution, Executor, FailedTestCase,
    NodeBoundExecution, TestReport, WorkerNode,
};
use crate::error::{EnvironmentError, RecordError, RecordResult};
use crate::models::BuildOutcome;

/// Snapshot of an execution and everything a builder may ask of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionSnapshot {
    pub id: String,
    pub project_name: String,
    pub full_project_name: String,
    pub display_name: String,
    pub full_display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub number: u32,
    pub start_time: DateTime<Utc>,
    /// Scheduled time; falls back to `start_time` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<BuildOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor: Option<ExecutorSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_report: Option<TestReportSnapshot>,
    /// Non-test actions, by name. Only used to exercise the report lookup.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_actions: Vec<NamedAction>,
    pub environment: EnvVars,
    /// When present, environment resolution fails with this cause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_error: Option<String>,
    pub build_variables: EnvVars,
    pub sensitive_build_variables: BTreeSet<String>,
    pub environment_contributions: Vec<ContributionSnapshot>,
    /// Top-most ancestor; `None` means this execution is its own root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<Box<ExecutionSnapshot>>,
}

/// Executor slot, optionally still attached to a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutorSnapshot {
    pub node: Option<NodeSnapshot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeSnapshot {
    pub display_name: String,
    pub label_string: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestReportSnapshot {
    pub total_count: i32,
    pub skip_count: i32,
    pub fail_count: i32,
    pub failed_tests: Vec<FailedTestSnapshot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FailedTestSnapshot {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

/// Attached action that is not a test report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedAction(pub String);

/// Variables contributed by one upstream step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributionSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub variables: EnvVars,
}

impl ExecutionSnapshot {
    /// Minimal top-level execution; other fields start empty.
    pub fn new(
        id: impl Into<String>,
        project_name: impl Into<String>,
        number: u32,
        start_time: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        let project_name = project_name.into();
        let display_name = format!("#{}", number);
        ExecutionSnapshot {
            full_display_name: format!("{} {}", project_name, display_name),
            full_project_name: project_name.clone(),
            url: format!("job/{}/{}/", project_name, number),
            id,
            project_name,
            display_name,
            number,
            start_time,
            ..Default::default()
        }
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json_str(content: &str) -> RecordResult<Self> {
        let snapshot: ExecutionSnapshot = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Read and parse a snapshot file.
    pub fn from_path(path: &Path) -> RecordResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RecordError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> RecordResult<()> {
        if self.id.trim().is_empty() {
            return Err(RecordError::Snapshot("execution id must not be empty".to_string()));
        }
        if self.project_name.trim().is_empty() {
            return Err(RecordError::Snapshot(format!(
                "execution {} has no project name",
                self.id
            )));
        }
        if let Some(ref root) = self.root {
            root.validate()?;
        }
        Ok(())
    }
}

impl Execution for ExecutionSnapshot {
    fn id(&self) -> &str {
        &self.id
    }

    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn full_project_name(&self) -> &str {
        &self.full_project_name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn full_display_name(&self) -> &str {
        &self.full_display_name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn number(&self) -> u32 {
        self.number
    }

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or(self.start_time)
    }

    fn outcome(&self) -> Option<BuildOutcome> {
        self.outcome
    }

    fn executor(&self) -> Option<&dyn Executor> {
        self.executor.as_ref().map(|e| e as &dyn Executor)
    }

    fn actions(&self) -> Vec<&dyn Action> {
        let mut actions: Vec<&dyn Action> = self
            .other_actions
            .iter()
            .map(|a| a as &dyn Action)
            .collect();
        if let Some(ref report) = self.test_report {
            actions.push(report);
        }
        actions
    }

    fn environment(&self) -> Result<EnvVars, EnvironmentError> {
        match self.environment_error {
            Some(ref cause) => Err(EnvironmentError::new(cause.clone())),
            None => Ok(self.environment.clone()),
        }
    }
}

impl NodeBoundExecution for ExecutionSnapshot {
    fn root_execution(&self) -> &dyn Execution {
        match self.root {
            Some(ref root) => &**root,
            None => self,
        }
    }

    fn build_variables(&self) -> EnvVars {
        self.build_variables.clone()
    }

    fn sensitive_build_variables(&self) -> BTreeSet<String> {
        self.sensitive_build_variables.clone()
    }

    fn environment_contributions(&self) -> Vec<&dyn EnvironmentContribution> {
        self.environment_contributions
            .iter()
            .map(|c| c as &dyn EnvironmentContribution)
            .collect()
    }
}

impl Executor for ExecutorSnapshot {
    fn node(&self) -> Option<&dyn WorkerNode> {
        self.node.as_ref().map(|n| n as &dyn WorkerNode)
    }
}

impl WorkerNode for NodeSnapshot {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn label_string(&self) -> &str {
        &self.label_string
    }
}

impl Action for NamedAction {}

impl Action for TestReportSnapshot {
    fn as_test_report(&self) -> Option<&dyn TestReport> {
        Some(self)
    }
}

impl TestReport for TestReportSnapshot {
    fn total_count(&self) -> i32 {
        self.total_count
    }

    fn skip_count(&self) -> i32 {
        self.skip_count
    }

    fn fail_count(&self) -> i32 {
        self.fail_count
    }

    fn failed_tests(&self) -> Vec<FailedTestCase> {
        self.failed_tests
            .iter()
            .map(|t| FailedTestCase {
                full_name: t.full_name.clone(),
                error_details: t.error_details.clone(),
            })
            .collect()
    }
}

impl EnvironmentContribution for ContributionSnapshot {
    fn contribute(&self, vars: &mut EnvVars) {
        vars.extend(
            self.variables
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
    }
}
