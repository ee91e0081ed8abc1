use super::host::{Host, HostCommand, HostError, HostOp};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared command log, so a test can keep reading after the host moved into
/// a client.
pub type CommandLog = Rc<RefCell<Vec<HostCommand>>>;

/// Host that records every command it accepts. Can be told to reject
/// particular ops to exercise failure paths.
#[derive(Default)]
pub struct RecordingHost {
    log: CommandLog,
    failing: Vec<HostOp>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(log: CommandLog) -> Self {
        Self {
            log,
            failing: Vec::new(),
        }
    }

    /// Reject every command with `op` from now on.
    pub fn failing_on(mut self, op: HostOp) -> Self {
        self.set_failing(op, true);
        self
    }

    pub fn set_failing(&mut self, op: HostOp, failing: bool) {
        self.failing.retain(|o| *o != op);
        if failing {
            self.failing.push(op);
        }
    }

    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    pub fn commands(&self) -> Vec<HostCommand> {
        self.log.borrow().clone()
    }

    pub fn ops(&self) -> Vec<HostOp> {
        self.log.borrow().iter().map(|c| c.op).collect()
    }

    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn clear(&mut self) {
        self.log.borrow_mut().clear();
    }
}

impl Host for RecordingHost {
    fn apply(&mut self, command: HostCommand) -> Result<(), HostError> {
        if self.failing.contains(&command.op) {
            return Err(HostError::Rejected {
                op: command.op,
                reason: "rejected by recording host".to_string(),
            });
        }
        self.log.borrow_mut().push(command);
        Ok(())
    }
}
