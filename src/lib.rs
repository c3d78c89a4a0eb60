//! CI build record library.
//!
//! Extracts identity, timing, placement, variables and test results from a host's
//! execution objects into a flat [`BuildRecord`] ready for log shipping.

pub mod config;
pub mod error;
pub mod events;
pub mod formatter;
pub mod host;
pub mod models;
pub mod services;

pub use error::{EnvironmentError, RecordError, RecordResult};
pub use models::{BuildRecord, TestSummary};
pub use services::RecordBuilder;
