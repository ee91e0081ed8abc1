use super::identity::{IdGenerator, describe, id_generator};
use super::lifecycle::{CommitOutcome, LifecycleState, NodeInstance};
use super::types::{Element, Node, NodeId};
use crate::bridge::{BridgeClient, Host};
use crate::codec::Codec;
use crate::config::BridgeConfig;
use crate::events::{EventRegistry, HostEvent, SharedEventRegistry};
use smartstring::{LazyCompact, SmartString};
use std::collections::HashMap;

type TreeKey = SmartString<LazyCompact>;

const ROOT_KEY: &str = "root";

/// Counts from one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub mounted: usize,
    pub updated: usize,
    pub unmounted: usize,
}

/// Drives the bridge from successive element trees.
///
/// Elements are matched to instances by tree key. Each pass first removes
/// instances that vanished (children before parents), then commits the rest
/// in pre-order.
pub struct RenderRoot<H: Host> {
    client: BridgeClient<H>,
    config: BridgeConfig,
    ids: Box<dyn IdGenerator>,
    instances: HashMap<TreeKey, NodeInstance>,
    order: Vec<TreeKey>,
}

impl<H: Host> RenderRoot<H> {
    pub fn new(host: H, config: BridgeConfig) -> Self {
        Self::with_registry(host, config, EventRegistry::shared())
    }

    pub fn with_registry(host: H, config: BridgeConfig, registry: SharedEventRegistry) -> Self {
        let codec = Codec::from_config(&config);
        Self {
            client: BridgeClient::with_codec(host, registry, codec),
            ids: id_generator(config.id_strategy),
            config,
            instances: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn render(&mut self, root: &Element) -> RenderReport {
        let mut previous = std::mem::take(&mut self.instances);
        let mut next = HashMap::with_capacity(previous.len());
        let mut commits = Vec::new();

        let root_key = root
            .key
            .clone()
            .unwrap_or_else(|| TreeKey::from(ROOT_KEY));
        self.plan(root_key, root, &mut previous, &mut next, &mut commits);

        let mut report = RenderReport {
            unmounted: self.remove_all(previous),
            ..RenderReport::default()
        };

        self.order.clear();
        for (key, node) in commits {
            let Some(instance) = next.get_mut(&key) else {
                continue;
            };
            match instance.commit(&mut self.client, node) {
                CommitOutcome::Mounted => report.mounted += 1,
                CommitOutcome::Updated => report.updated += 1,
            }
            self.order.push(key);
        }
        self.instances = next;

        tracing::debug!(
            "render: {} mounted, {} updated, {} unmounted",
            report.mounted,
            report.updated,
            report.unmounted
        );
        report
    }

    /// Unmount every live instance.
    pub fn clear(&mut self) -> usize {
        let instances = std::mem::take(&mut self.instances);
        let removed = self.remove_all(instances);
        self.order.clear();
        removed
    }

    fn plan(
        &mut self,
        key: TreeKey,
        element: &Element,
        previous: &mut HashMap<TreeKey, NodeInstance>,
        next: &mut HashMap<TreeKey, NodeInstance>,
        commits: &mut Vec<(TreeKey, Node)>,
    ) {
        if next.contains_key(&key) {
            tracing::warn!("duplicate key {}, skipping element", key);
            return;
        }

        let reusable = previous
            .get(&key)
            .is_some_and(|existing| existing.matches(element));
        let instance = if reusable { previous.remove(&key) } else { None };
        let instance = instance.unwrap_or_else(|| {
            let id = match &element.id {
                Some(id) => id.clone(),
                None => self.ids.next_id(),
            };
            NodeInstance::new(id, element)
        });

        let node = describe(element, instance.id().clone(), &self.config);
        let children: Vec<Element> = node.child_elements().cloned().collect();
        next.insert(key.clone(), instance);
        commits.push((key, node));

        for child in &children {
            let Some(child_key) = child.key.clone() else {
                continue;
            };
            self.plan(child_key, child, previous, next, commits);
        }
    }

    /// Remove `instances` in reverse commit order, so children go first.
    fn remove_all(&mut self, mut instances: HashMap<TreeKey, NodeInstance>) -> usize {
        let mut removed = 0;
        for key in self.order.iter().rev() {
            let Some(instance) = instances.remove(key) else {
                continue;
            };
            if instance.remove(&mut self.client) {
                removed += 1;
            }
        }
        for (_, instance) in instances.drain() {
            if instance.remove(&mut self.client) {
                removed += 1;
            }
        }
        removed
    }

    pub fn node_id(&self, key: &str) -> Option<&NodeId> {
        self.instances.get(key).map(NodeInstance::id)
    }

    pub fn state(&self, key: &str) -> Option<LifecycleState> {
        self.instances.get(key).map(NodeInstance::state)
    }

    /// Tree keys of live instances in commit order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|key| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Deliver a host event to the handler registered for its node.
    pub fn dispatch(&self, event: &HostEvent) -> bool {
        self.client.registry().dispatch(event)
    }

    pub fn registry(&self) -> SharedEventRegistry {
        self.client.shared_registry()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn client(&self) -> &BridgeClient<H> {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut BridgeClient<H> {
        &mut self.client
    }

    pub fn host(&self) -> &H {
        self.client.host()
    }
}
