// Directory module - registered peer membership

mod roster;

pub use roster::PeerDirectory;
