// HostRegistry - the authoritative auction table
//
// Lives on the host node only. State machine per auction id:
// Open --bid*--> Open, Open --close--> removed (terminal, no archival).

use crate::auction::model::{winning_bid, Amount, Auction, AuctionId, Bid, Winner};
use crate::auction::AuctionError;
use crate::identity::PeerId;
use std::collections::HashMap;
use tracing::info;

/// Authoritative in-memory table of open auctions
#[derive(Default)]
pub struct HostRegistry {
    auctions: HashMap<AuctionId, Auction>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an auction. An existing entry under the same id is
    /// silently overwritten; ids are not validated for uniqueness.
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

        let item = item.into();
        info!(auction = %id, %item, starting_price, "auction opened");
        self.auctions.insert(id, Auction::new(item, starting_price));
        Ok(())
    }

    /// Append a bid. Unknown ids are never created implicitly.
    ///
    /// There is deliberately no rule that a bid must exceed the current
    /// highest bid or the starting price; the fold at close time sorts
    /// that out.
    pub fn place_bid(
        &mut self,
        id: &AuctionId,
        bidder: PeerId,
        amount: Amount,
    ) -> Result<(), AuctionError> {
        let auction = self
            .auctions
            .get_mut(id)
            .ok_or_else(|| AuctionError::NotFound(id.clone()))?;

        info!(auction = %id, %bidder, amount, "bid placed");
        auction.bids.push(Bid { bidder, amount });
        Ok(())
    }

    /// Close an auction: compute the winner and remove the entry.
    pub fn close(&mut self, id: &AuctionId) -> Result<Winner, AuctionError> {
        let auction = self
            .auctions
            .remove(id)
            .ok_or_else(|| AuctionError::NotFound(id.clone()))?;

        let winner = winning_bid(&auction.bids);
        let label = winner
            .bidder
            .map(|b| b.to_string())
            .unwrap_or_else(|| "none".into());
        info!(auction = %id, winner = %label, amount = winner.amount, "auction closed");
        Ok(winner)
    }

    pub fn contains(&self, id: &AuctionId) -> bool {
        self.auctions.contains_key(id)
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
    fn test_open_bid_close_lifecycle() {
        let mut registry = HostRegistry::new();
        let id = AuctionId::from("car");

        registry.open(id.clone(), "Fiat Panda", 100).unwrap();
        registry.place_bid(&id, peer(1), 150).unwrap();

        let winner = registry.close(&id).unwrap();
        assert_eq!(winner.bidder, Some(peer(1)));
        assert_eq!(winner.amount, 150);
        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_closed_auction_never_readmits_bids() {
        let mut registry = HostRegistry::new();
        let id = AuctionId::from("car");

        registry.open(id.clone(), "Fiat Panda", 100).unwrap();
        registry.close(&id).unwrap();

        let result = registry.place_bid(&id, peer(1), 200);
        assert!(matches!(result, Err(AuctionError::NotFound(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_bid_on_unknown_id_leaves_state_unchanged() {
        let mut registry = HostRegistry::new();

        let result = registry.place_bid(&AuctionId::from("ghost"), peer(1), 10);
        assert!(matches!(result, Err(AuctionError::NotFound(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_close_unknown_id() {
        let mut registry = HostRegistry::new();
        let result = registry.close(&AuctionId::from("ghost"));
        assert!(matches!(result, Err(AuctionError::NotFound(_))));
    }

    #[test]
    fn test_zero_starting_price_rejected() {
        let mut registry = HostRegistry::new();
        let result = registry.open(AuctionId::from("car"), "Fiat Panda", 0);
        assert!(matches!(result, Err(AuctionError::InvalidStartingPrice(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reopen_overwrites_existing_entry() {
        let mut registry = HostRegistry::new();
        let id = AuctionId::from("car");

        registry.open(id.clone(), "Fiat Panda", 100).unwrap();
        registry.place_bid(&id, peer(1), 150).unwrap();

        // Collision silently replaces the auction, bids included
        registry.open(id.clone(), "Fiat Panda (relisted)", 200).unwrap();
        let winner = registry.close(&id).unwrap();
        assert_eq!(winner, Winner::none());
    }
}
