// Protocol - tagged request/response schema for the auction rpc
//
// One variant per remote operation, validated at the transport
// boundary: an undecodable body is a malformed-payload failure, never
// an unchecked parse. Encoded with postcard.

use crate::auction::{Amount, AuctionId};
use crate::identity::PeerId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol errors
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("malformed payload")]
    MalformedPayload,
}

/// Requests a node can address to a peer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// Register the caller with the host
    RegisterClient { client: PeerId },
    /// Membership notification: `client` joined the swarm
    PeerJoined { client: PeerId },
    /// Open an auction (host call and peer notification alike)
    OpenAuction {
        auction_id: AuctionId,
        item: String,
        starting_price: Amount,
    },
    /// Place a bid
    PlaceBid {
        auction_id: AuctionId,
        client: PeerId,
        amount: Amount,
    },
    /// Close an auction (host computes the winner)
    CloseAuction { auction_id: AuctionId },
    /// Result notification after a close
    AuctionClosed {
        auction_id: AuctionId,
        winner: Option<PeerId>,
        amount: Amount,
    },
}

impl Request {
    /// Wire name of the operation (for logs)
    pub fn operation(&self) -> &'static str {
        match self {
            Request::RegisterClient { .. } => "registerClient",
            Request::PeerJoined { .. } => "peerJoined",
            Request::OpenAuction { .. } => "openAuction",
            Request::PlaceBid { .. } => "placeBid",
            Request::CloseAuction { .. } => "closeAuction",
            Request::AuctionClosed { .. } => "auctionClosed",
        }
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).unwrap_or_default()
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        postcard::from_bytes(bytes).map_err(|_| ProtocolError::MalformedPayload)
    }
}

/// Responses, one shape per outcome.
///
/// Registry-level misses travel here as `NotFound`, not as transport
/// failures; callers inspect the response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// Registration accepted
    Registered { client: PeerId },
    /// Notification received
    Ack,
    /// Auction created
    AuctionOpened { auction_id: AuctionId },
    /// Starting price rejected by the host
    InvalidPrice { auction_id: AuctionId },
    /// Bid appended
    BidPlaced {
        auction_id: AuctionId,
        client: PeerId,
        amount: Amount,
    },
    /// Close result with the winning bid
    AuctionClosed {
        auction_id: AuctionId,
        winner: Option<PeerId>,
        amount: Amount,
    },
    /// Bid or close addressed to an unknown id
    NotFound { auction_id: AuctionId },
}

impl Response {
    /// Human-readable status line for each response shape
    pub fn status(&self) -> &'static str {
        match self {
            Response::Registered { .. } => "Client registered",
            Response::Ack => "Notification received",
            Response::AuctionOpened { .. } => "Auction opened",
            Response::InvalidPrice { .. } => "Invalid starting price",
            Response::BidPlaced { .. } => "Bid placed",
            Response::AuctionClosed { .. } => "Auction closed",
            Response::NotFound { .. } => "Auction not found",
        }
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).unwrap_or_default()
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        postcard::from_bytes(bytes).map_err(|_| ProtocolError::MalformedPayload)
    }
}
