//! Test summary attached to a build record.

use serde::{Deserialize, Serialize};

/// Counts and failures taken from an execution's test report.
///
/// `pass_count` is always `total_count - skip_count - fail_count` in wrapping `i32`
/// arithmetic; host counts are passed through without validation, so an inconsistent
/// report yields a negative (or wrapped) pass count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub total_count: i32,
    pub skip_count: i32,
    pub fail_count: i32,
    pub pass_count: i32,
    /// Failed tests with their error detail, index-aligned with `failed_tests`
    pub failed_tests_with_error_detail: Vec<FailedTest>,
    /// Full names of failed tests, in report order
    pub failed_tests: Vec<String>,
}

/// A failed test and the error it reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedTest {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl TestSummary {
    /// Zero counts, no failures. Used when no test report is attached.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a summary from raw counts, deriving the pass count.
    pub fn from_counts(total_count: i32, skip_count: i32, fail_count: i32) -> Self {
        TestSummary {
            total_count,
            skip_count,
            fail_count,
            pass_count: total_count.wrapping_sub(skip_count).wrapping_sub(fail_count),
            failed_tests_with_error_detail: Vec::new(),
            failed_tests: Vec::new(),
        }
    }

    /// Record one failed test in both failure lists.
    pub fn push_failure(&mut self, full_name: String, error_details: Option<String>) {
        self.failed_tests.push(full_name.clone());
        self.failed_tests_with_error_detail.push(FailedTest {
            full_name,
            error_details,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0 && self.failed_tests.is_empty()
    }
}
