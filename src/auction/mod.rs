// Auction module - THE LEDGER OF LOTS
// Authoritative host registry, bidder-side mirror, winner selection

mod mirror;
mod model;
mod registry;

pub use mirror::MirrorRegistry;
pub use model::{winning_bid, Amount, Auction, AuctionId, Bid, Winner};
pub use registry::HostRegistry;

use thiserror::Error;

/// Auction-level errors
#[derive(Error, Debug)]
pub enum AuctionError {
    /// Bid or close addressed to an id the registry does not hold.
    /// Travels on the wire as a "not found" status, never as a
    /// transport failure.
    #[error("auction not found: {0}")]
    NotFound(AuctionId),

    /// Local guard: a node may not bid on an auction it opened, nor
    /// close an auction it did not open.
    #[error("self-auction violation: {0}")]
    SelfAuction(AuctionId),

    /// Starting price was zero or not a number
    #[error("invalid starting price: {0}")]
    InvalidStartingPrice(String),
}
