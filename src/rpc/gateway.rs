// RpcGateway - named remote operations over the peer transport
//
// Outbound: encode a request, call the peer, decode the response.
// Inbound: RpcEndpoint adapts any Respond implementor into the
// transport's handler shape. No retries and no gateway-level timeout;
// whatever the underlying transport enforces is all there is.

use crate::identity::PeerId;
use crate::rpc::protocol::{ProtocolError, Request, Response};
use crate::transport::{InboundHandler, PeerTransport, TransportError};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Failures of an rpc call, distinct from registry-level statuses
/// which travel inside the response payload.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("peer {peer} unreachable: {reason}")]
    Unreachable { peer: PeerId, reason: String },

    #[error("malformed payload")]
    MalformedPayload,
}

impl From<ProtocolError> for RpcError {
    fn from(_: ProtocolError) -> Self {
        RpcError::MalformedPayload
    }
}

/// Outbound call surface over an abstract peer transport
#[derive(Clone)]
pub struct RpcGateway {
    transport: Arc<dyn PeerTransport>,
}

impl RpcGateway {
    pub fn new(transport: Arc<dyn PeerTransport>) -> Self {
        Self { transport }
    }

    /// Invoke an operation on a specific peer and decode its response
    pub async fn call(&self, peer: &PeerId, request: &Request) -> Result<Response, RpcError> {
        debug!(%peer, operation = request.operation(), "outbound call");

        let raw = self
            .transport
            .call(peer, &request.to_bytes())
            .await
            .map_err(|e| RpcError::Unreachable {
                peer: *peer,
                reason: e.to_string(),
            })?;

        Ok(Response::from_bytes(&raw)?)
    }
}

/// Dispatch target for inbound requests
#[async_trait]
pub trait Respond: Send + Sync {
    async fn respond(&self, request: Request) -> Response;
}

/// Adapter mounting a Respond implementor on the transport
pub struct RpcEndpoint<H: Respond> {
    handler: Arc<H>,
}

impl<H: Respond> RpcEndpoint<H> {
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<H: Respond + 'static> InboundHandler for RpcEndpoint<H> {
    async fn handle(&self, payload: &[u8]) -> Result<Vec<u8>, TransportError> {
        let request = Request::from_bytes(payload)
            .map_err(|e| TransportError::HandlerFailed(e.to_string()))?;

        let response = self.handler.respond(request).await;
        Ok(response.to_bytes())
    }
}
