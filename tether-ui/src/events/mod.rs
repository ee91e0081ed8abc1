mod queue;
mod registry;

pub use queue::EventQueue;
pub use registry::{EventRegistry, HandlerSet, SharedEventRegistry};

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smartstring::{LazyCompact, SmartString};
use std::fmt;
use std::io::BufRead;
use std::sync::Arc;
use thiserror::Error;

/// Event names the bridge tracks handlers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    ChangeText,
    Click,
    Press,
    Release,
    SubmitEditing,
}

impl EventName {
    pub const COUNT: usize = 5;

    pub const ALL: [EventName; Self::COUNT] = [
        EventName::ChangeText,
        EventName::Click,
        EventName::Press,
        EventName::Release,
        EventName::SubmitEditing,
    ];

    /// The prop name authors use for this event.
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::ChangeText => "onChangeText",
            EventName::Click => "onClick",
            EventName::Press => "onPress",
            EventName::Release => "onRelease",
            EventName::SubmitEditing => "onSubmitEditing",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type HandlerFn = dyn Fn(&Value) + Send + Sync;

/// A callable taking one event payload. The empty handler is a no-op.
#[derive(Clone, Default)]
pub struct EventHandler(Option<Arc<HandlerFn>>);

impl EventHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        Self(Some(Arc::new(f)))
    }

    pub fn noop() -> Self {
        Self(None)
    }

    pub fn is_noop(&self) -> bool {
        self.0.is_none()
    }

    pub fn call(&self, payload: &Value) {
        if let Some(f) = &self.0 {
            f(payload);
        }
    }

    /// Same underlying callable (two no-ops compare equal).
    pub fn same_as(&self, other: &EventHandler) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            f.write_str("EventHandler(noop)")
        } else {
            f.write_str("EventHandler(fn)")
        }
    }
}

/// An event emitted by the native host for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEvent {
    #[serde(rename = "id")]
    pub node_id: NodeId,
    pub event: SmartString<LazyCompact>,
    #[serde(default)]
    pub payload: Value,
}

impl HostEvent {
    pub fn new(
        node_id: NodeId,
        event: impl Into<SmartString<LazyCompact>>,
        payload: Value,
    ) -> Self {
        Self {
            node_id,
            event: event.into(),
            payload,
        }
    }

    pub fn from_json_line(line: &str) -> Result<Self, EventDecodeError> {
        Ok(serde_json::from_str(line)?)
    }
}

#[derive(Error, Debug)]
pub enum EventDecodeError {
    #[error("failed to read host event stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed host event: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode JSON-lines host events. Blank lines are skipped.
pub fn read_events<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<HostEvent, EventDecodeError>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(HostEvent::from_json_line(&line)),
        Err(e) => Some(Err(e.into())),
    })
}
