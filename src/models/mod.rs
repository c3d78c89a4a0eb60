//! Record models produced by the builders.

pub mod build_record;
pub mod latch;
pub mod outcome;
pub mod test_summary;

// Re-export commonly used types
pub use build_record::{BuildRecord, RootExecution};
pub use latch::Latch;
pub use outcome::BuildOutcome;
pub use test_summary::{FailedTest, TestSummary};
