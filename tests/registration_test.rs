// Registration Tests
// Symmetric discovery between the host and its registered peers

use bidmesh::node::{BidderNode, HostNode};
use bidmesh::rpc::{Response, RpcEndpoint};
use bidmesh::storage::NodeStore;
use bidmesh::transport::MemoryMesh;
use std::sync::Arc;
use tempfile::TempDir;

struct Mesh {
    mesh: MemoryMesh,
    host: Arc<HostNode>,
    _dirs: Vec<TempDir>,
}

impl Mesh {
    async fn start() -> Self {
        let mesh = MemoryMesh::new();
        let dir = TempDir::new().unwrap();
        let store = NodeStore::open(dir.path()).unwrap();
        let host = HostNode::start(&store, mesh.transport()).unwrap();
        mesh.attach(host.peer_id(), Arc::new(RpcEndpoint::new(host.clone())))
            .await;
        Self {
            mesh,
            host,
            _dirs: vec![dir],
        }
    }

    async fn bidder(&mut self, label: &str) -> Arc<BidderNode> {
        let dir = TempDir::new().unwrap();
        let store = NodeStore::open(dir.path()).unwrap();
        self._dirs.push(dir);
        let bidder =
            BidderNode::start(&store, self.mesh.transport(), self.host.peer_id(), label).unwrap();
        self.mesh
            .attach(bidder.peer_id(), Arc::new(RpcEndpoint::new(bidder.clone())))
            .await;
        bidder
    }
}

#[tokio::test]
async fn test_registration_is_symmetric() {
    let mut mesh = Mesh::start().await;
    let p1 = mesh.bidder("p1").await;
    let p2 = mesh.bidder("p2").await;

    let r1 = p1.register().await.unwrap();
    assert_eq!(r1, Response::Registered { client: p1.peer_id() });
    p2.register().await.unwrap();

    // Old peer learns of the newcomer, newcomer learns of the old peer
    assert_eq!(p1.known_peers().await, vec![p2.peer_id()]);
    assert_eq!(p2.known_peers().await, vec![p1.peer_id()]);
    assert_eq!(
        mesh.host.registered_peers().await,
        vec![p1.peer_id(), p2.peer_id()]
    );
}

#[tokio::test]
async fn test_reregistration_keeps_membership_set() {
    let mut mesh = Mesh::start().await;
    let p1 = mesh.bidder("p1").await;
    let p2 = mesh.bidder("p2").await;

    p1.register().await.unwrap();
    p2.register().await.unwrap();
    // The duplicate registration still runs the full notify cycle but
    // must not duplicate membership.
    p1.register().await.unwrap();

    assert_eq!(
        mesh.host.registered_peers().await,
        vec![p1.peer_id(), p2.peer_id()]
    );
    assert_eq!(p2.known_peers().await, vec![p1.peer_id()]);
}

#[tokio::test]
async fn test_registration_survives_unreachable_member() {
    let mut mesh = Mesh::start().await;
    let p1 = mesh.bidder("p1").await;
    let p2 = mesh.bidder("p2").await;

    p1.register().await.unwrap();
    // p1 drops off the network before p2 arrives
    mesh.mesh.detach(&p1.peer_id()).await;

    let response = p2.register().await.unwrap();
    assert_eq!(response, Response::Registered { client: p2.peer_id() });

    // The failed notification to p1 did not abort the cycle: p2 is a
    // member and still learnt about p1.
    assert_eq!(
        mesh.host.registered_peers().await,
        vec![p1.peer_id(), p2.peer_id()]
    );
    assert_eq!(p2.known_peers().await, vec![p1.peer_id()]);
}
