use super::types::{Element, Node, NodeId, WidgetType};
use crate::bridge::{BridgeClient, Host};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unmounted,
    Mounting,
    Mounted,
    Unmounting,
}

/// What a commit did for one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// First commit: mount, then the render's update.
    Mounted,
    Updated,
}

/// Bridge-side state of one element instance across renders.
///
/// Bridge failures are logged here and never reach the caller.
#[derive(Debug)]
pub struct NodeInstance {
    id: NodeId,
    authored: Option<NodeId>,
    kind: WidgetType,
    state: LifecycleState,
    last: Option<Node>,
}

impl NodeInstance {
    /// `id` is the authored id when the element has one, otherwise a freshly
    /// minted token cached here for the instance's lifetime.
    pub fn new(id: NodeId, element: &Element) -> Self {
        Self {
            id,
            authored: element.id.clone(),
            kind: element.kind.clone(),
            state: LifecycleState::Unmounted,
            last: None,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> &WidgetType {
        &self.kind
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn persistent(&self) -> bool {
        self.authored.is_some()
    }

    /// Last descriptor sent with an update.
    pub fn last(&self) -> Option<&Node> {
        self.last.as_ref()
    }

    /// Whether `element` still describes this instance. A different type or
    /// authored id means a different instance.
    pub fn matches(&self, element: &Element) -> bool {
        self.kind == element.kind && self.authored == element.id
    }

    /// Send this render's descriptor. The first commit mounts before the
    /// update; the mount call returns before the update is issued, so
    /// `Mounting` never outlives a commit.
    pub fn commit<H: Host>(&mut self, client: &mut BridgeClient<H>, node: Node) -> CommitOutcome {
        let outcome = if self.state == LifecycleState::Unmounted {
            self.transition(LifecycleState::Mounting);
            if let Err(err) = client.mount(&node) {
                tracing::warn!("mount of {} failed: {}", self.id, err);
            }
            self.transition(LifecycleState::Mounted);
            CommitOutcome::Mounted
        } else {
            CommitOutcome::Updated
        };

        if let Err(err) = client.update(&node) {
            tracing::warn!("update of {} failed: {}", self.id, err);
        }
        self.last = Some(node);
        outcome
    }

    /// Release the instance's mirrored state. Consumes the instance so the
    /// release happens at most once. Returns true if a destroy was sent.
    pub fn remove<H: Host>(mut self, client: &mut BridgeClient<H>) -> bool {
        if self.state != LifecycleState::Mounted {
            tracing::debug!("{} removed before commit", self.id);
            return false;
        }

        self.transition(LifecycleState::Unmounting);
        let Some(last) = self.last.take() else {
            self.transition(LifecycleState::Unmounted);
            return false;
        };
        if let Err(err) = client.unmount(&last) {
            tracing::warn!("unmount of {} failed: {}", self.id, err);
        }
        self.transition(LifecycleState::Unmounted);
        true
    }

    fn transition(&mut self, to: LifecycleState) {
        tracing::debug!("{} {:?} -> {:?}", self.id, self.state, to);
        self.state = to;
    }
}
