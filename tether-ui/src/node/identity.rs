use super::types::{Child, Element, Node, NodeId, WidgetType};
use crate::config::{BridgeConfig, IdStrategy};
use std::collections::HashSet;

/// Mints ids for elements that did not author one.
pub trait IdGenerator {
    fn next_id(&mut self) -> NodeId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> NodeId {
        NodeId::from(uuid::Uuid::new_v4().to_string())
    }
}

/// `node-1`, `node-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        self.issued += 1;
        NodeId::from(format!("node-{}", self.issued))
    }
}

pub fn id_generator(strategy: IdStrategy) -> Box<dyn IdGenerator> {
    match strategy {
        IdStrategy::Uuid => Box::new(UuidIds),
        IdStrategy::Sequential => Box::new(SequentialIds::default()),
    }
}

/// `"<prefix> <type> <authored>"`, skipping empty parts.
pub fn class_name(prefix: &str, kind: &WidgetType, authored: Option<&str>) -> String {
    [prefix, kind.as_str(), authored.unwrap_or("")]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Relabel element children under `parent`: each is cloned with its parent
/// overwritten and its key namespaced by the parent id. Authored keys become
/// `"<parent>-k:<key>"` and positional ones `"<parent>-#<index>"`, so the two
/// never collide. A repeated authored key falls back to the positional key.
/// Leaves pass through.
pub fn link_children(parent: &NodeId, children: &[Child]) -> Vec<Child> {
    let mut seen = HashSet::new();
    children
        .iter()
        .enumerate()
        .map(|(index, child)| match child {
            Child::Element(element) => {
                let mut linked = element.clone();
                let key = match &element.key {
                    Some(key) if seen.insert(key.clone()) => format!("{parent}-k:{key}"),
                    Some(key) => {
                        tracing::warn!("repeated key {} under {}, keyed by position", key, parent);
                        format!("{parent}-#{index}")
                    }
                    None => format!("{parent}-#{index}"),
                };
                linked.parent = Some(parent.clone());
                linked.key = Some(key.into());
                Child::Element(linked)
            }
            Child::Leaf(value) => Child::Leaf(value.clone()),
        })
        .collect()
}

/// Build this render's descriptor for `element`, which has already been
/// given `id`.
pub fn describe(element: &Element, id: NodeId, config: &BridgeConfig) -> Node {
    let mut style = config.default_style.clone();
    for (key, value) in &element.style {
        style.insert(key.clone(), value.clone());
    }

    let children = link_children(&id, &element.children);

    Node {
        class_name: class_name(
            &config.class_prefix,
            &element.kind,
            element.class_name.as_deref(),
        ),
        kind: element.kind.clone(),
        parent_id: element.parent.clone(),
        persistent: element.id.is_some(),
        style,
        props: element.props.clone(),
        children,
        id,
    }
}
