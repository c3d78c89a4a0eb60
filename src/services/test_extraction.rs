//! Test summary extraction from an attached test report.

use tracing::debug;

use crate::host::Action;
use crate::models::TestSummary;

/// Summarize the test report carried by `action`.
///
/// Absent actions and actions that are not test reports produce [`TestSummary::empty`].
/// Counts are read as reported; failures keep the report's order.
pub fn extract_test_summary(action: Option<&dyn Action>) -> TestSummary {
    let Some(report) = action.and_then(|a| a.as_test_report()) else {
        return TestSummary::empty();
    };

    let mut summary =
        TestSummary::from_counts(report.total_count(), report.skip_count(), report.fail_count());

    for failed in report.failed_tests() {
        summary.push_failure(failed.full_name, failed.error_details);
    }

    debug!(
        "Extracted test summary: {} total, {} failed, {} skipped",
        summary.total_count, summary.fail_count, summary.skip_count
    );

    summary
}
