//! Diagnostic events raised while building records.
//!
//! Failures the builders absorb (they never reach the caller) are reported here instead.
//! The default sink forwards to `tracing`; tests install a [`CollectingSink`].

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which builder raised an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderVariant {
    /// Node-bound, redaction-aware builder
    NodeBound,
    /// Builder reading the execution's own resolved environment
    SelfContained,
}

impl BuilderVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NodeBound => "node_bound",
            Self::SelfContained => "self_contained",
        }
    }
}

impl std::fmt::Display for BuilderVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Something went wrong but record construction carried on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum RecordEvent {
    /// The execution's process environment could not be resolved.
    EnvironmentUnavailable(EnvironmentUnavailablePayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentUnavailablePayload {
    pub display_name: String,
    pub variant: BuilderVariant,
    pub cause: String,
}

impl RecordEvent {
    pub fn environment_unavailable(
        display_name: impl Into<String>,
        variant: BuilderVariant,
        cause: impl Into<String>,
    ) -> Self {
        RecordEvent::EnvironmentUnavailable(EnvironmentUnavailablePayload {
            display_name: display_name.into(),
            variant,
            cause: cause.into(),
        })
    }
}

/// Receives events raised during record construction.
pub trait EventSink {
    fn emit(&self, event: RecordEvent);
}

/// Logs every event as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: RecordEvent) {
        match event {
            RecordEvent::EnvironmentUnavailable(payload) => match payload.variant {
                BuilderVariant::NodeBound => warn!(
                    "Unable to update buildVariables with environment from {}: {}",
                    payload.display_name, payload.cause
                ),
                BuilderVariant::SelfContained => warn!(
                    "Unable to get environment for {}: {}",
                    payload.display_name, payload.cause
                ),
            },
        }
    }
}

/// Keeps events in memory for inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: RefCell<Vec<RecordEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> Vec<RecordEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: RecordEvent) {
        self.events.borrow_mut().push(event);
    }
}
