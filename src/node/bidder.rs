// BidderNode - a registered peer that opens, bids and closes
//
// Mirrors the auctions it opened itself so the self-auction guards and
// the local close run without a round trip. Every coordination
// operation goes to the host first, then fans out to the peers this
// node has learnt about, so mirrored state across the swarm stays
// approximately in sync.

use crate::auction::{Amount, AuctionId, MirrorRegistry};
use crate::directory::PeerDirectory;
use crate::identity::{get_or_create_seed, Keypair, PeerId};
use crate::node::NodeError;
use crate::rpc::{BroadcastCoordinator, Respond, Request, Response, RpcGateway};
use crate::storage::{keys, NodeStore};
use crate::transport::PeerTransport;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

struct BidderState {
    mirror: MirrorRegistry,
    peers: PeerDirectory,
}

/// A non-host peer in the auction swarm
pub struct BidderNode {
    id: PeerId,
    label: String,
    host: PeerId,
    state: Mutex<BidderState>,
    gateway: RpcGateway,
    broadcaster: BroadcastCoordinator,
}

impl BidderNode {
    /// Bootstrap the bidder identity from its byte-store and wire it
    /// to the transport. Registration with the host is a separate
    /// step; see [`BidderNode::register`].
    pub fn start(
        store: &NodeStore,
        transport: Arc<dyn PeerTransport>,
        host: PeerId,
        label: impl Into<String>,
    ) -> Result<Arc<Self>, NodeError> {
        let seed = get_or_create_seed(store, keys::DHT_SEED)?;
        let keypair = Keypair::from_seed(&seed);
        let label = label.into();

        info!(client = %label, id = %keypair.peer_id(), "bidder node up");

        let gateway = RpcGateway::new(transport);
        Ok(Arc::new(Self {
            id: keypair.peer_id(),
            label,
            host,
            state: Mutex::new(BidderState {
                mirror: MirrorRegistry::new(),
                peers: PeerDirectory::new(),
            }),
            gateway: gateway.clone(),
            broadcaster: BroadcastCoordinator::new(gateway),
        }))
    }

    pub fn peer_id(&self) -> PeerId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Peers this node has learnt about, in discovery order
    pub async fn known_peers(&self) -> Vec<PeerId> {
        self.state.lock().await.peers.members().to_vec()
    }

    pub async fn owns_auction(&self, id: &AuctionId) -> bool {
        self.state.lock().await.mirror.owns(id)
    }

    /// Announce this node to the host. The host replies after the
    /// discovery cycle, so on return this node already knows every
    /// previously registered peer.
    pub async fn register(&self) -> Result<Response, NodeError> {
        let request = Request::RegisterClient { client: self.id };
        Ok(self.gateway.call(&self.host, &request).await?)
    }

    /// Open an auction: mirror locally, tell the host, notify peers.
    pub async fn open_auction(
        &self,
        auction_id: AuctionId,
        item: impl Into<String>,
        starting_price: Amount,
    ) -> Result<Response, NodeError> {
        let item = item.into();
        {
            let mut state = self.state.lock().await;
            state
                .mirror
                .open(auction_id.clone(), item.clone(), starting_price)?;
        }

        let request = Request::OpenAuction {
            auction_id,
            item,
            starting_price,
        };
        let response = self.gateway.call(&self.host, &request).await?;
        self.notify_peers(&request).await;
        Ok(response)
    }

    /// Place a bid on someone else's auction. The self-auction guard
    /// runs first, before any remote call is issued.
    pub async fn place_bid(
        &self,
        auction_id: AuctionId,
        amount: Amount,
    ) -> Result<Response, NodeError> {
        {
            let state = self.state.lock().await;
            state.mirror.guard_bid(&auction_id)?;
        }

        let request = Request::PlaceBid {
            auction_id,
            client: self.id,
            amount,
        };
        let response = self.gateway.call(&self.host, &request).await?;
        self.notify_peers(&request).await;
        Ok(response)
    }

    /// Close an auction this node opened. The winner is computed over
    /// the locally mirrored bid list; host and mirror must already
    /// agree for the results to be consistent.
    pub async fn close_auction(&self, auction_id: AuctionId) -> Result<Response, NodeError> {
        let winner = {
            let mut state = self.state.lock().await;
            state.mirror.close(&auction_id)?
        };

        let winner_label = winner
            .bidder
            .map(|b| b.to_string())
            .unwrap_or_else(|| "none".into());
        info!(
            client = %self.label,
            auction = %auction_id,
            winner = %winner_label,
            amount = winner.amount,
            "auction closed locally"
        );

        let response = self
            .gateway
            .call(
                &self.host,
                &Request::CloseAuction {
                    auction_id: auction_id.clone(),
                },
            )
            .await?;

        let result = Request::AuctionClosed {
            auction_id,
            winner: winner.bidder,
            amount: winner.amount,
        };
        self.notify_peers(&result).await;
        Ok(response)
    }

    async fn notify_peers(&self, request: &Request) {
        let peers = {
            let state = self.state.lock().await;
            state.peers.members().to_vec()
        };
        self.broadcaster.broadcast(&peers, request).await;
    }
}

#[async_trait]
impl Respond for BidderNode {
    async fn respond(&self, request: Request) -> Response {
        match request {
            Request::PeerJoined { client } => {
                if client != self.id {
                    let mut state = self.state.lock().await;
                    state.peers.insert(client);
                }
                debug!(client = %self.label, peer = %client, "registration notification");
                Response::Ack
            }
            Request::PlaceBid {
                auction_id,
                client,
                amount,
            } => {
                let mut state = self.state.lock().await;
                match state.mirror.record_bid(&auction_id, client, amount) {
                    Ok(()) => Response::BidPlaced {
                        auction_id,
                        client,
                        amount,
                    },
                    Err(_) => Response::NotFound { auction_id },
                }
            }
            Request::OpenAuction { auction_id, .. } => {
                debug!(client = %self.label, auction = %auction_id, "open notification");
                Response::Ack
            }
            Request::CloseAuction { auction_id } => {
                debug!(client = %self.label, auction = %auction_id, "close notification");
                Response::Ack
            }
            Request::AuctionClosed {
                auction_id,
                winner,
                amount,
            } => {
                let winner_label = winner
                    .map(|w| w.to_string())
                    .unwrap_or_else(|| "none".into());
                info!(
                    client = %self.label,
                    auction = %auction_id,
                    winner = %winner_label,
                    amount,
                    "auction closed notification"
                );
                Response::Ack
            }
            // Only the host registers clients
            Request::RegisterClient { .. } => Response::Ack,
        }
    }
}
