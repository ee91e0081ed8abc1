use super::{EventRegistry, HostEvent};
use std::collections::VecDeque;

/// FIFO buffer for host events waiting to be delivered
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<HostEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HostEvent) {
        self.events.push_back(event);
    }

    /// Drain all events in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Deliver every queued event through `registry` in arrival order.
    /// Returns how many reached a real handler.
    pub fn dispatch_all(&mut self, registry: &EventRegistry) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.events.pop_front() {
            if registry.dispatch(&event) {
                delivered += 1;
            }
        }
        delivered
    }
}
