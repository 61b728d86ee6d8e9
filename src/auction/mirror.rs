// MirrorRegistry - node-local copies of self-opened auctions
//
// A bidder mirrors only the auctions it opened itself. The mirror
// backs two local guards (no self-bids, no closing someone else's
// auction) and accumulates bids arriving via broadcast so a local
// close can compute the winner without asking the host.
//
// Mirrored state is only as fresh as the broadcasts that reached this
// node; under partial broadcast failure it may diverge from the host's
// table permanently. That weakness is part of the design, not patched
// here with extra consensus.

use crate::auction::model::{winning_bid, Amount, Auction, AuctionId, Bid, Winner};
use crate::auction::AuctionError;
use crate::identity::PeerId;
use std::collections::HashMap;
use tracing::debug;

/// Mirrored auction metadata for auctions this node opened
#[derive(Default)]
pub struct MirrorRegistry {
    auctions: HashMap<AuctionId, Auction>,
}

impl MirrorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror a locally opened auction. Same validation and overwrite
    /// semantics as the host registry.
    pub fn open(
        &mut self,
        id: AuctionId,
        item: impl Into<String>,
        starting_price: Amount,
    ) -> Result<(), AuctionError> {
        if starting_price == 0 {
            return Err(AuctionError::InvalidStartingPrice(
                starting_price.to_string(),
            ));
        }
        self.auctions
            .insert(id, Auction::new(item.into(), starting_price));
        Ok(())
    }

    /// Whether this node opened the given auction
    pub fn owns(&self, id: &AuctionId) -> bool {
        self.auctions.contains_key(id)
    }

    /// Refuse a bid on an auction this node opened. Checked before any
    /// remote call is issued.
    pub fn guard_bid(&self, id: &AuctionId) -> Result<(), AuctionError> {
        if self.owns(id) {
            return Err(AuctionError::SelfAuction(id.clone()));
        }
        Ok(())
    }

    /// Record a bid relayed by broadcast, if the auction is mirrored
    /// here. Bids for auctions other nodes opened are not tracked.
    pub fn record_bid(
        &mut self,
        id: &AuctionId,
        bidder: PeerId,
        amount: Amount,
    ) -> Result<(), AuctionError> {
        let auction = self
            .auctions
            .get_mut(id)
            .ok_or_else(|| AuctionError::NotFound(id.clone()))?;

        debug!(auction = %id, %bidder, amount, "mirrored bid recorded");
        auction.bids.push(Bid { bidder, amount });
        Ok(())
    }

    /// Close a locally owned auction: compute the winner over the
    /// mirrored bid list and drop the entry. Closing an auction this
    /// node did not open is a self-auction violation.
    pub fn close(&mut self, id: &AuctionId) -> Result<Winner, AuctionError> {
        let auction = self
            .auctions
            .remove(id)
            .ok_or_else(|| AuctionError::SelfAuction(id.clone()))?;

        Ok(winning_bid(&auction.bids))
    }

    pub fn len(&self) -> usize {
        self.auctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auctions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Keypair;

    fn peer(n: u8) -> PeerId {
        Keypair::from_seed(&[n; 32]).peer_id()
    }

    #[test]
    fn test_self_bid_guard() {
        let mut mirror = MirrorRegistry::new();
        let id = AuctionId::from("car");
        mirror.open(id.clone(), "Fiat Panda", 100).unwrap();

        let result = mirror.guard_bid(&id);
        assert!(matches!(result, Err(AuctionError::SelfAuction(_))));

        // Bidding on someone else's auction is fine locally
        mirror.guard_bid(&AuctionId::from("boat")).unwrap();
    }

    #[test]
    fn test_foreign_close_refused() {
        let mut mirror = MirrorRegistry::new();
        let result = mirror.close(&AuctionId::from("car"));
        assert!(matches!(result, Err(AuctionError::SelfAuction(_))));
    }

    #[test]
    fn test_local_close_uses_mirrored_bids() {
        let mut mirror = MirrorRegistry::new();
        let id = AuctionId::from("car");
        mirror.open(id.clone(), "Fiat Panda", 100).unwrap();
        mirror.record_bid(&id, peer(1), 120).unwrap();
        mirror.record_bid(&id, peer(2), 150).unwrap();

        let winner = mirror.close(&id).unwrap();
        assert_eq!(winner.bidder, Some(peer(2)));
        assert_eq!(winner.amount, 150);
        assert!(!mirror.owns(&id));
    }

    #[test]
    fn test_record_bid_for_unmirrored_auction() {
        let mut mirror = MirrorRegistry::new();
        let result = mirror.record_bid(&AuctionId::from("ghost"), peer(1), 10);
        assert!(matches!(result, Err(AuctionError::NotFound(_))));
    }
}
