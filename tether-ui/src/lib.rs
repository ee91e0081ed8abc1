pub mod bridge;
pub mod codec;
pub mod config;
pub mod events;
pub mod node;
pub mod style;
pub mod widgets;

// Re-export key types
pub use bridge::{BridgeClient, BridgeError, Host, HostCommand, HostError, HostOp};
pub use codec::{Codec, CodecError, StyleEncoding};
pub use config::{BridgeConfig, ConfigError, IdStrategy};
pub use events::{EventHandler, EventName, EventRegistry, HostEvent, SharedEventRegistry};
pub use node::{Element, Node, NodeId, RenderReport, RenderRoot, WidgetType};
pub use style::{StyleSheet, StyleTranslator};
