use super::{EventHandler, EventName, HostEvent};
use crate::node::{NodeId, PropValue, Props};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// One handler slot per recognized event name.
#[derive(Debug, Clone, Default)]
pub struct HandlerSet {
    handlers: [EventHandler; EventName::COUNT],
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the recognized event handlers out of a prop bag. Names without a
    /// callable get a no-op.
    pub fn from_props(props: &Props) -> Self {
        let mut set = Self::new();
        for name in EventName::ALL {
            if let Some(PropValue::Handler(handler)) = props.get(name.as_str()) {
                set.set(name, handler.clone());
            }
        }
        set
    }

    pub fn get(&self, name: EventName) -> &EventHandler {
        &self.handlers[name.index()]
    }

    pub fn set(&mut self, name: EventName, handler: EventHandler) {
        self.handlers[name.index()] = handler;
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventName, &EventHandler)> {
        EventName::ALL.into_iter().zip(self.handlers.iter())
    }

    /// Number of slots holding a real handler.
    pub fn live_count(&self) -> usize {
        self.handlers.iter().filter(|h| !h.is_noop()).count()
    }
}

pub type SharedEventRegistry = Arc<EventRegistry>;

/// Node id -> current handlers. Written by `update`, cleared by `unmount`,
/// read by whoever delivers host events.
#[derive(Default)]
pub struct EventRegistry {
    entries: RwLock<HashMap<NodeId, HandlerSet>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedEventRegistry {
        Arc::new(Self::new())
    }

    /// Replace the entry for `id` wholesale.
    pub fn set(&self, id: &NodeId, handlers: HandlerSet) {
        self.entries.write().insert(id.clone(), handlers);
    }

    /// Returns true if an entry existed.
    pub fn remove(&self, id: &NodeId) -> bool {
        self.entries.write().remove(id).is_some()
    }

    /// Current handler for `event` on `id`, or a no-op when either is unknown.
    pub fn get(&self, id: &NodeId, event: &str) -> EventHandler {
        let Some(name) = EventName::parse(event) else {
            return EventHandler::noop();
        };
        self.entries
            .read()
            .get(id)
            .map(|set| set.get(name).clone())
            .unwrap_or_default()
    }

    pub fn handlers(&self, id: &NodeId) -> Option<HandlerSet> {
        self.entries.read().get(id).cloned()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.entries.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Invoke the handler for `id`/`event` with `payload`.
    /// Returns true if a real handler ran.
    pub fn invoke(&self, id: &NodeId, event: &str, payload: &Value) -> bool {
        // Lock is released before the call; handlers may re-render.
        let handler = self.get(id, event);
        if handler.is_noop() {
            tracing::trace!("no handler for {}::{}", id, event);
            return false;
        }
        tracing::trace!("dispatching {}::{}", id, event);
        handler.call(payload);
        true
    }

    pub fn dispatch(&self, event: &HostEvent) -> bool {
        self.invoke(&event.node_id, &event.event, &event.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_handler(counter: &Arc<AtomicUsize>) -> EventHandler {
        let counter = counter.clone();
        EventHandler::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_from_props_fills_noops() {
        let press = EventHandler::new(|_| {});
        let mut props = Props::new();
        props.insert("onPress", PropValue::Handler(press.clone()));
        props.insert("onClick", PropValue::from("not callable"));

        let set = HandlerSet::from_props(&props);
        assert!(set.get(EventName::Press).same_as(&press));
        assert!(set.get(EventName::Click).is_noop());
        assert!(set.get(EventName::ChangeText).is_noop());
        assert_eq!(set.live_count(), 1);
    }

    #[test]
    fn test_set_replaces_whole_entry() {
        let registry = EventRegistry::new();
        let id = NodeId::from("n1");

        let mut first = HandlerSet::new();
        first.set(EventName::Press, EventHandler::new(|_| {}));
        first.set(EventName::Click, EventHandler::new(|_| {}));
        registry.set(&id, first);

        let release = EventHandler::new(|_| {});
        let mut second = HandlerSet::new();
        second.set(EventName::Release, release.clone());
        registry.set(&id, second);

        assert!(registry.get(&id, "onPress").is_noop());
        assert!(registry.get(&id, "onClick").is_noop());
        assert!(registry.get(&id, "onRelease").same_as(&release));
    }

    #[test]
    fn test_unknown_lookups_are_noops() {
        let registry = EventRegistry::new();
        let id = NodeId::from("n1");
        registry.set(&id, HandlerSet::new());

        assert!(registry.get(&NodeId::from("missing"), "onPress").is_noop());
        assert!(registry.get(&id, "onHover").is_noop());
        assert!(!registry.invoke(&id, "onHover", &Value::Null));
    }

    #[test]
    fn test_dispatch_invokes_current_handler() {
        let registry = EventRegistry::new();
        let id = NodeId::from("n1");
        let counter = Arc::new(AtomicUsize::new(0));

        let mut set = HandlerSet::new();
        set.set(EventName::Press, counting_handler(&counter));
        registry.set(&id, set);

        let delivered = registry.dispatch(&HostEvent::new(id.clone(), "onPress", json!({})));
        assert!(delivered);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_clears_entry() {
        let registry = EventRegistry::new();
        let id = NodeId::from("n1");
        let counter = Arc::new(AtomicUsize::new(0));

        let mut set = HandlerSet::new();
        set.set(EventName::Press, counting_handler(&counter));
        registry.set(&id, set);

        assert!(registry.remove(&id));
        assert!(!registry.remove(&id));
        assert!(!registry.contains(&id));
        assert!(!registry.invoke(&id, "onPress", &Value::Null));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_may_write_registry() {
        let registry = EventRegistry::shared();
        let id = NodeId::from("n1");

        let inner = registry.clone();
        let inner_id = id.clone();
        let mut set = HandlerSet::new();
        set.set(
            EventName::Press,
            EventHandler::new(move |_| {
                inner.remove(&inner_id);
            }),
        );
        registry.set(&id, set);

        assert!(registry.invoke(&id, "onPress", &Value::Null));
        assert!(registry.is_empty());
    }
}
