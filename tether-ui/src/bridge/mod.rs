mod client;
mod host;
mod json_lines;
mod recording;

pub use client::{BridgeClient, BridgeError};
pub use host::{Host, HostCommand, HostError, HostOp};
pub use json_lines::{JsonLinesHost, decode_command};
pub use recording::{CommandLog, RecordingHost};
