// BroadcastCoordinator - sequential one-to-many notification
//
// Fans one event out to every peer in the given membership snapshot,
// one call at a time, in the directory's insertion order. Best-effort:
// a failed peer is recorded and the remaining peers are still
// notified, and the aggregated report goes back to the caller.

use crate::identity::PeerId;
use crate::rpc::gateway::{RpcError, RpcGateway};
use crate::rpc::protocol::Request;
use tracing::warn;

/// Outcome of a fan-out
#[derive(Debug, Default)]
pub struct BroadcastReport {
    /// Peers that acknowledged the notification
    pub delivered: usize,
    /// Peers the notification never reached, with the failure
    pub failures: Vec<(PeerId, RpcError)>,
}

impl BroadcastReport {
    pub fn all_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sequential fan-out over the rpc gateway
#[derive(Clone)]
pub struct BroadcastCoordinator {
    gateway: RpcGateway,
}

impl BroadcastCoordinator {
    pub fn new(gateway: RpcGateway) -> Self {
        Self { gateway }
    }

    /// Send `request` to every peer in `peers`, in order.
    pub async fn broadcast(&self, peers: &[PeerId], request: &Request) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for peer in peers {
            match self.gateway.call(peer, request).await {
                Ok(_) => report.delivered += 1,
                Err(e) => {
                    warn!(
                        %peer,
                        operation = request.operation(),
                        error = %e,
                        "broadcast delivery failed"
                    );
                    report.failures.push((*peer, e));
                }
            }
        }

        report
    }
}
