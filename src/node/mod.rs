// Node module - host and bidder wiring over the rpc layer

mod bidder;
mod host;

pub use bidder::BidderNode;
pub use host::HostNode;

use crate::auction::AuctionError;
use crate::identity::IdentityError;
use crate::rpc::RpcError;
use crate::storage::StoreError;
use thiserror::Error;

/// Top-level node failures surfaced to the CLI
#[derive(Error, Debug)]
pub enum NodeError {
    #[error(transparent)]
    Auction(#[from] AuctionError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
