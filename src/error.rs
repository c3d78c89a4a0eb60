//! Domain error types for build record extraction.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Builder operations never return these; only serialization and snapshot loading do.

/// Record-level errors.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Record or snapshot could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot content is structurally valid JSON but unusable
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    /// Reading a snapshot from disk or stdin failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Convenience type alias for Results with RecordError.
pub type RecordResult<T> = Result<T, RecordError>;

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        RecordError::Io(err.to_string())
    }
}

/// Failure reported by a host while resolving an execution's environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct EnvironmentError(pub String);

impl EnvironmentError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}
