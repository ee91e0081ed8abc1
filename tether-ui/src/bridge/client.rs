use super::host::{Host, HostCommand, HostError, HostOp};
use crate::codec::{Codec, CodecError};
use crate::events::{EventRegistry, SharedEventRegistry};
use crate::node::Node;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Sends node lifecycle commands to the host and keeps the event registry in
/// step with the handlers of the latest update.
pub struct BridgeClient<H: Host> {
    host: H,
    codec: Codec,
    registry: SharedEventRegistry,
}

impl<H: Host> BridgeClient<H> {
    pub fn new(host: H, registry: SharedEventRegistry) -> Self {
        Self::with_codec(host, registry, Codec::default())
    }

    pub fn with_codec(host: H, registry: SharedEventRegistry, codec: Codec) -> Self {
        Self {
            host,
            codec,
            registry,
        }
    }

    /// Ask the host to create the node's widget. Never touches the registry.
    pub fn mount(&mut self, node: &Node) -> Result<()> {
        self.send(HostOp::Create, node)
    }

    /// Send the node's full attribute set, then replace its registry entry
    /// with the handlers carried by this render. The registry is refreshed
    /// whether or not the host accepted the patch.
    pub fn update(&mut self, node: &Node) -> Result<()> {
        let sent = self.send(HostOp::Patch, node);
        self.registry.set(&node.id, node.handlers());
        sent
    }

    /// Ask the host to destroy the node's widget and drop its handlers. The
    /// entry is dropped even if the host failed.
    pub fn unmount(&mut self, node: &Node) -> Result<()> {
        let sent = self.send(HostOp::Destroy, node);
        self.registry.remove(&node.id);
        sent
    }

    fn send(&mut self, op: HostOp, node: &Node) -> Result<()> {
        let payload = self.codec.encode(node)?;
        tracing::debug!("{} {} ({})", op, node.id, node.kind);
        self.host.apply(HostCommand::new(op, payload))?;
        Ok(())
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    pub fn shared_registry(&self) -> SharedEventRegistry {
        self.registry.clone()
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
