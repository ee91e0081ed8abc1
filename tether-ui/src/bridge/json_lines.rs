use super::host::{Host, HostCommand, HostError, HostOp};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::io::Write;

#[derive(Serialize)]
struct WireCommand<'a> {
    op: &'static str,
    node: &'a RawValue,
}

#[derive(Deserialize)]
struct OwnedWireCommand {
    op: String,
    node: Box<RawValue>,
}

/// Host sink writing one JSON object per line:
/// `{"op":"create","node":{...}}`.
pub struct JsonLinesHost<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesHost<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of commands written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Host for JsonLinesHost<W> {
    fn apply(&mut self, command: HostCommand) -> Result<(), HostError> {
        let node: &RawValue =
            serde_json::from_str(&command.payload).map_err(|e| HostError::Rejected {
                op: command.op,
                reason: format!("payload is not JSON: {e}"),
            })?;

        let line = WireCommand {
            op: command.op.as_str(),
            node,
        };
        serde_json::to_writer(&mut self.writer, &line).map_err(std::io::Error::from)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Parse one line written by [`JsonLinesHost`] back into a command.
pub fn decode_command(line: &str) -> serde_json::Result<Option<HostCommand>> {
    let wire: OwnedWireCommand = serde_json::from_str(line)?;
    let op = match wire.op.as_str() {
        "create" => HostOp::Create,
        "patch" => HostOp::Patch,
        "destroy" => HostOp::Destroy,
        _ => return Ok(None),
    };
    Ok(Some(HostCommand::new(op, wire.node.get().to_string())))
}
