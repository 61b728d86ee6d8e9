// Auction model - auctions, bids, and winner selection
//
// Amounts are integer minor currency units. Bids are append-only; the
// whole bid list is discarded when an auction closes.

use crate::identity::PeerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency amount in minor units
pub type Amount = u64;

/// Opaque caller-supplied auction identifier.
///
/// Uniqueness is not enforced: opening an id that already exists
/// silently overwrites the previous entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuctionId(String);

impl AuctionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AuctionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single bid. Never mutated or removed individually.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: PeerId,
    pub amount: Amount,
}

/// An open auction and its bid sequence
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Auction {
    pub item: String,
    pub starting_price: Amount,
    pub bids: Vec<Bid>,
}

impl Auction {
    pub fn new(item: impl Into<String>, starting_price: Amount) -> Self {
        Self {
            item: item.into(),
            starting_price,
            bids: Vec::new(),
        }
    }
}

/// Winning bid, derived once at close time and never stored.
///
/// The sentinel winner (`bidder: None, amount: 0`) is the result of
/// closing an auction that received no bids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub bidder: Option<PeerId>,
    pub amount: Amount,
}

impl Winner {
    pub fn none() -> Self {
        Self {
            bidder: None,
            amount: 0,
        }
    }
}

/// Fold the bid sequence into the winning bid.
///
/// Starts from the zero sentinel and only replaces the leader on a
/// strictly greater amount, so on ties the first qualifying bid in
/// append order keeps the lead.
pub fn winning_bid(bids: &[Bid]) -> Winner {
    bids.iter().fold(Winner::none(), |leader, bid| {
        if bid.amount > leader.amount {
            Winner {
                bidder: Some(bid.bidder),
                amount: bid.amount,
            }
        } else {
            leader
        }
    })
}
