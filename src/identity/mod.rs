// Identity module - Ed25519 keypair management and seed bootstrap

mod keypair;
mod seed;

pub use keypair::{Keypair, KeypairError, PeerId};
pub use seed::{get_or_create_seed, IdentityError};
