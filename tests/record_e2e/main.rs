//! Record E2E test suite.
//!
//! Loads execution snapshots from `tests/fixtures` and runs them through the builders.
//!
//! Run with: cargo test --test record_e2e

mod test_helpers;

mod test_generic;
mod test_node_bound;
mod test_self_contained;
mod test_serialization;
