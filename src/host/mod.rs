//! Capability traits describing the host's execution graph.
//!
//! A record builder only ever sees these traits. Hosts adapt their own build objects
//! to them; [`ExecutionSnapshot`] is a static, JSON-loadable implementation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::error::EnvironmentError;
use crate::models::BuildOutcome;

pub mod snapshot;

pub use snapshot::ExecutionSnapshot;

/// Environment/parameter variables, ordered by key.
pub type EnvVars = BTreeMap<String, String>;

/// A running or completed unit of work.
pub trait Execution {
    fn id(&self) -> &str;
    /// Short name of the owning project.
    fn project_name(&self) -> &str;
    /// Fully qualified name of the owning project (folders included).
    fn full_project_name(&self) -> &str;
    fn display_name(&self) -> &str;
    fn full_display_name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn url(&self) -> &str;
    fn number(&self) -> u32;
    fn start_time(&self) -> DateTime<Utc>;
    /// Scheduled time; this is what the record's formatted timestamp shows.
    fn timestamp(&self) -> DateTime<Utc>;
    /// `None` while the execution is still running.
    fn outcome(&self) -> Option<BuildOutcome>;
    fn executor(&self) -> Option<&dyn Executor>;
    fn actions(&self) -> Vec<&dyn Action>;
    /// Fully resolved process environment. May block briefly; may fail.
    fn environment(&self) -> Result<EnvVars, EnvironmentError>;
}

/// Slot that runs an execution.
pub trait Executor {
    /// The node owning this executor, if it still exists.
    fn node(&self) -> Option<&dyn WorkerNode>;
}

/// Machine or agent an execution runs on.
pub trait WorkerNode {
    fn display_name(&self) -> &str;
    fn label_string(&self) -> &str;
}

/// Something attached to an execution after the fact (reports, badges, causes).
pub trait Action {
    /// Type lookup: returns the test report view when this action carries one.
    fn as_test_report(&self) -> Option<&dyn TestReport> {
        None
    }
}

/// Aggregated test results attached to an execution.
pub trait TestReport {
    fn total_count(&self) -> i32;
    fn skip_count(&self) -> i32;
    fn fail_count(&self) -> i32;
    /// Failed tests in report order.
    fn failed_tests(&self) -> Vec<FailedTestCase>;
}

/// A single failed test as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTestCase {
    pub full_name: String,
    pub error_details: Option<String>,
}

/// An upstream step that adds variables before the execution starts.
pub trait EnvironmentContribution {
    fn contribute(&self, vars: &mut EnvVars);
}

/// Execution bound to a worker node with a contribution chain and secret variables.
pub trait NodeBoundExecution: Execution {
    /// Top-most ancestor. Returns the execution itself when it has no parent.
    fn root_execution(&self) -> &dyn Execution;
    /// Execution-local variables (parameters and the like).
    fn build_variables(&self) -> EnvVars;
    /// Names of variables that must never leave the host.
    fn sensitive_build_variables(&self) -> BTreeSet<String>;
    fn environment_contributions(&self) -> Vec<&dyn EnvironmentContribution>;
}

/// Find the first attached action that carries a test report.
pub fn find_test_action<'a>(execution: &'a dyn Execution) -> Option<&'a dyn Action> {
    execution
        .actions()
        .into_iter()
        .find(|action| action.as_test_report().is_some())
}
