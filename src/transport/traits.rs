// Transport traits - the seam to the external peer network
//
// The rendezvous/DHT network, NAT traversal and channel encryption are
// external collaborators. The coordination protocol only needs one
// capability: send a request to a peer identified by its public key
// and get the response bytes back.

use crate::identity::PeerId;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from the transport layer
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("peer unreachable: {0}")]
    Unreachable(PeerId),

    #[error("request handler failed: {0}")]
    HandlerFailed(String),
}

/// Outbound request/response capability, keyed by peer identity.
///
/// A call suspends the caller until the matching response arrives or
/// the transport reports failure; any timeout is the transport's own.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn call(&self, peer: &PeerId, payload: &[u8]) -> Result<Vec<u8>, TransportError>;
}

/// Inbound side: a node mounts one handler for all requests addressed
/// to its identity.
#[async_trait]
pub trait InboundHandler: Send + Sync {
    async fn handle(&self, payload: &[u8]) -> Result<Vec<u8>, TransportError>;
}
