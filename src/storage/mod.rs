// Storage module - sled-backed byte-store for identity bootstrap

mod store;

pub use store::{keys, NodeStore, StoreError};
