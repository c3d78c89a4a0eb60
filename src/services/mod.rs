//! Record construction services.

pub mod node_bound;
pub mod record_builder;
pub mod self_contained;
pub mod test_extraction;

pub use record_builder::{resolve_placement, RecordBuilder, MASTER};
pub use test_extraction::extract_test_summary;
