// HostNode - the authoritative auction host
//
// Owns the host registry and the peer directory. Handles the inbound
// operations and fans membership and close notifications out to every
// registered peer. State is locked only around mutation; membership
// snapshots are taken before any outbound call goes out.

use crate::auction::{Amount, AuctionId, HostRegistry};
use crate::directory::PeerDirectory;
use crate::identity::{get_or_create_seed, Keypair, PeerId};
use crate::node::NodeError;
use crate::rpc::{BroadcastCoordinator, Respond, Request, Response, RpcGateway};
use crate::storage::{keys, NodeStore};
use crate::transport::PeerTransport;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

struct HostState {
    registry: HostRegistry,
    directory: PeerDirectory,
}

/// The single authoritative node owning auction state while open
pub struct HostNode {
    id: PeerId,
    state: Mutex<HostState>,
    gateway: RpcGateway,
    broadcaster: BroadcastCoordinator,
}

impl HostNode {
    /// Bootstrap the host identity from the byte-store and wire it to
    /// the transport. Persists the rpc public key for operators.
    pub fn start(
        store: &NodeStore,
        transport: Arc<dyn PeerTransport>,
    ) -> Result<Arc<Self>, NodeError> {
        // The dht seed keeps the node's rendezvous identity stable;
        // the rpc seed is what peers address requests to.
        let _dht_seed = get_or_create_seed(store, keys::DHT_SEED)?;
        let rpc_seed = get_or_create_seed(store, keys::RPC_SEED)?;

        let keypair = Keypair::from_seed(&rpc_seed);
        let id = keypair.peer_id();
        store.save_host_public_key(&id)?;

        info!(host = %id, key = %id.to_hex(), "auction host listening");

        let gateway = RpcGateway::new(transport);
        Ok(Arc::new(Self {
            id,
            state: Mutex::new(HostState {
                registry: HostRegistry::new(),
                directory: PeerDirectory::new(),
            }),
            gateway: gateway.clone(),
            broadcaster: BroadcastCoordinator::new(gateway),
        }))
    }

    pub fn peer_id(&self) -> PeerId {
        self.id
    }

    /// Registered peers in insertion order
    pub async fn registered_peers(&self) -> Vec<PeerId> {
        self.state.lock().await.directory.members().to_vec()
    }

    pub async fn has_auction(&self, id: &AuctionId) -> bool {
        self.state.lock().await.registry.contains(id)
    }

    pub async fn open_auction_count(&self) -> usize {
        self.state.lock().await.registry.len()
    }

    /// The symmetric discovery cycle: old peers learn of the newcomer,
    /// the newcomer learns of every old peer.
    ///
    /// A re-registration runs the full cycle again even though the
    /// membership insert is idempotent; the redundant notifications
    /// are a documented quirk of the protocol, kept as-is.
    async fn register_client(&self, client: PeerId) -> Response {
        let before = {
            let state = self.state.lock().await;
            state.directory.members().to_vec()
        };

        self.broadcaster
            .broadcast(&before, &Request::PeerJoined { client })
            .await;

        let members = {
            let mut state = self.state.lock().await;
            state.directory.insert(client);
            state.directory.members().to_vec()
        };

        for member in members.iter().filter(|m| **m != client) {
            let notify = Request::PeerJoined { client: *member };
            if let Err(e) = self.gateway.call(&client, &notify).await {
                warn!(newcomer = %client, peer = %member, error = %e, "discovery notification failed");
            }
        }

        info!(client = %client, peers = members.len(), "client registered");
        Response::Registered { client }
    }

    async fn open_auction(&self, auction_id: AuctionId, item: String, price: Amount) -> Response {
        let mut state = self.state.lock().await;
        // Open only fails on price validation
        match state.registry.open(auction_id.clone(), item, price) {
            Ok(()) => Response::AuctionOpened { auction_id },
            Err(_) => Response::InvalidPrice { auction_id },
        }
    }

    async fn place_bid(&self, auction_id: AuctionId, client: PeerId, amount: Amount) -> Response {
        let mut state = self.state.lock().await;
        match state.registry.place_bid(&auction_id, client, amount) {
            Ok(()) => Response::BidPlaced {
                auction_id,
                client,
                amount,
            },
            Err(_) => Response::NotFound { auction_id },
        }
    }

    async fn close_auction(&self, auction_id: AuctionId) -> Response {
        let (winner, members) = {
            let mut state = self.state.lock().await;
            match state.registry.close(&auction_id) {
                Ok(winner) => (winner, state.directory.members().to_vec()),
                Err(_) => return Response::NotFound { auction_id },
            }
        };

        let notice = Request::AuctionClosed {
            auction_id: auction_id.clone(),
            winner: winner.bidder,
            amount: winner.amount,
        };
        let report = self.broadcaster.broadcast(&members, &notice).await;
        if !report.all_delivered() {
            warn!(
                auction = %auction_id,
                failed = report.failures.len(),
                "close notification missed some peers"
            );
        }

        Response::AuctionClosed {
            auction_id,
            winner: winner.bidder,
            amount: winner.amount,
        }
    }
}

#[async_trait]
impl Respond for HostNode {
    async fn respond(&self, request: Request) -> Response {
        match request {
            Request::RegisterClient { client } => self.register_client(client).await,
            Request::OpenAuction {
                auction_id,
                item,
                starting_price,
            } => self.open_auction(auction_id, item, starting_price).await,
            Request::PlaceBid {
                auction_id,
                client,
                amount,
            } => self.place_bid(auction_id, client, amount).await,
            Request::CloseAuction { auction_id } => self.close_auction(auction_id).await,
            // Peer-facing notifications are not meaningful at the host
            Request::PeerJoined { .. } | Request::AuctionClosed { .. } => Response::Ack,
        }
    }
}
