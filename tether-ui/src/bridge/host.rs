use std::fmt;
use thiserror::Error;

/// The three message kinds the native host accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOp {
    Create,
    Patch,
    Destroy,
}

impl HostOp {
    pub fn as_str(self) -> &'static str {
        match self {
            HostOp::Create => "create",
            HostOp::Patch => "patch",
            HostOp::Destroy => "destroy",
        }
    }
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message for the host: an op plus the encoded node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    pub op: HostOp,
    pub payload: String,
}

impl HostCommand {
    pub fn new(op: HostOp, payload: String) -> Self {
        Self { op, payload }
    }

    /// Payload parsed back into JSON. Diagnostics and tests only.
    pub fn payload_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.payload)
    }
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("host I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("host rejected {op}: {reason}")]
    Rejected { op: HostOp, reason: String },

    #[error("host is not connected")]
    Disconnected,
}

/// Message sink for the native host.
///
/// Implementations deliver commands to wherever the widget tree lives
/// (another process, a pipe, a test buffer).
pub trait Host {
    fn apply(&mut self, command: HostCommand) -> Result<(), HostError>;
}

impl<F> Host for F
where
    F: FnMut(HostCommand) -> Result<(), HostError>,
{
    fn apply(&mut self, command: HostCommand) -> Result<(), HostError> {
        self(command)
    }
}
