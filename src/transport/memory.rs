// MemoryMesh - in-process loopback transport
//
// Dispatches calls directly to the target's inbound handler. Used by
// the local mesh mode of the binary and by the integration tests; a
// real rendezvous-backed transport mounts behind the same trait.

use crate::identity::PeerId;
use crate::transport::{InboundHandler, PeerTransport, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Loopback network of in-process nodes keyed by PeerId
#[derive(Clone, Default)]
pub struct MemoryMesh {
    handlers: Arc<Mutex<HashMap<PeerId, Arc<dyn InboundHandler>>>>,
}

impl MemoryMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a node's inbound handler under its identity
    pub async fn attach(&self, peer: PeerId, handler: Arc<dyn InboundHandler>) {
        self.handlers.lock().await.insert(peer, handler);
    }

    /// Unmount a node; subsequent calls to it fail as unreachable
    pub async fn detach(&self, peer: &PeerId) {
        self.handlers.lock().await.remove(peer);
    }

    pub fn transport(&self) -> Arc<dyn PeerTransport> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl PeerTransport for MemoryMesh {
    async fn call(&self, peer: &PeerId, payload: &[u8]) -> Result<Vec<u8>, TransportError> {
        // Snapshot the handler before invoking so nested calls made by
        // the handler can take the lock again.
        let handler = {
            let handlers = self.handlers.lock().await;
            handlers
                .get(peer)
                .cloned()
                .ok_or(TransportError::Unreachable(*peer))?
        };

        handler.handle(payload).await
    }
}
