mod identity;
mod lifecycle;
mod tree;
mod types;

pub use identity::{
    IdGenerator, SequentialIds, UuidIds, class_name, describe, id_generator, link_children,
};
pub use lifecycle::{CommitOutcome, LifecycleState, NodeInstance};
pub use tree::{RenderReport, RenderRoot};
pub use types::{Child, Element, Node, NodeId, PropValue, Props, WidgetType};
