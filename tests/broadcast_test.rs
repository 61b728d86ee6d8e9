// Broadcast Tests
// Best-effort fan-out over the loopback transport

use async_trait::async_trait;
use bidmesh::auction::AuctionId;
use bidmesh::identity::{Keypair, PeerId};
use bidmesh::rpc::{BroadcastCoordinator, Request, Respond, Response, RpcEndpoint, RpcGateway};
use bidmesh::transport::MemoryMesh;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn peer(n: u8) -> PeerId {
    Keypair::from_seed(&[n; 32]).peer_id()
}

struct Counting {
    received: AtomicUsize,
}

#[async_trait]
impl Respond for Counting {
    async fn respond(&self, _request: Request) -> Response {
        self.received.fetch_add(1, Ordering::SeqCst);
        Response::Ack
    }
}

async fn attach_counting(mesh: &MemoryMesh, id: PeerId) -> Arc<Counting> {
    let handler = Arc::new(Counting {
        received: AtomicUsize::new(0),
    });
    mesh.attach(id, Arc::new(RpcEndpoint::new(handler.clone())))
        .await;
    handler
}

#[tokio::test]
async fn test_broadcast_reaches_every_peer() {
    let mesh = MemoryMesh::new();
    let a = attach_counting(&mesh, peer(1)).await;
    let b = attach_counting(&mesh, peer(2)).await;

    let coordinator = BroadcastCoordinator::new(RpcGateway::new(mesh.transport()));
    let report = coordinator
        .broadcast(
            &[peer(1), peer(2)],
            &Request::CloseAuction {
                auction_id: AuctionId::from("car"),
            },
        )
        .await;

    assert!(report.all_delivered());
    assert_eq!(report.delivered, 2);
    assert_eq!(a.received.load(Ordering::SeqCst), 1);
    assert_eq!(b.received.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_broadcast_continues_past_unreachable_peer() {
    let mesh = MemoryMesh::new();
    let a = attach_counting(&mesh, peer(1)).await;
    // peer(2) is never attached
    let c = attach_counting(&mesh, peer(3)).await;

    let coordinator = BroadcastCoordinator::new(RpcGateway::new(mesh.transport()));
    let report = coordinator
        .broadcast(
            &[peer(1), peer(2), peer(3)],
            &Request::PeerJoined { client: peer(9) },
        )
        .await;

    // Best-effort: the failure is collected and the remaining peer is
    // still notified.
    assert_eq!(report.delivered, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, peer(2));
    assert_eq!(a.received.load(Ordering::SeqCst), 1);
    assert_eq!(c.received.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_broadcast_to_nobody() {
    let mesh = MemoryMesh::new();
    let coordinator = BroadcastCoordinator::new(RpcGateway::new(mesh.transport()));

    let report = coordinator
        .broadcast(&[], &Request::PeerJoined { client: peer(1) })
        .await;

    assert!(report.all_delivered());
    assert_eq!(report.delivered, 0);
}
