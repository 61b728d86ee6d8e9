// Seed bootstrap - load-or-generate identity seeds from the byte-store
//
// Idempotent across restarts: same store, same key, same seed, same
// derived network identity.

use crate::storage::{NodeStore, StoreError};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("stored seed has invalid length: expected 32, got {0}")]
    InvalidSeedLength(usize),
}

/// Return the 32-byte seed stored under `key`, generating and
/// persisting a fresh one on first run.
///
/// Store I/O failures propagate; there is no retry.
pub fn get_or_create_seed(store: &NodeStore, key: &[u8]) -> Result<[u8; 32], IdentityError> {
    if let Some(bytes) = store.get_raw(key)? {
        if bytes.len() != 32 {
            return Err(IdentityError::InvalidSeedLength(bytes.len()));
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes);
        return Ok(seed);
    }

    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    store.put_raw(key, &seed)?;
    store.flush()?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::keys;
    use tempfile::TempDir;

    #[test]
    fn test_seed_created_once() {
        let temp_dir = TempDir::new().unwrap();
        let store = NodeStore::open(temp_dir.path()).unwrap();

        let first = get_or_create_seed(&store, keys::DHT_SEED).unwrap();
        let second = get_or_create_seed(&store, keys::DHT_SEED).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let first = {
            let store = NodeStore::open(temp_dir.path()).unwrap();
            get_or_create_seed(&store, keys::DHT_SEED).unwrap()
        };

        let store = NodeStore::open(temp_dir.path()).unwrap();
        let second = get_or_create_seed(&store, keys::DHT_SEED).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_keys_distinct_seeds() {
        let temp_dir = TempDir::new().unwrap();
        let store = NodeStore::open(temp_dir.path()).unwrap();

        let dht = get_or_create_seed(&store, keys::DHT_SEED).unwrap();
        let rpc = get_or_create_seed(&store, keys::RPC_SEED).unwrap();

        assert_ne!(dht, rpc);
    }

    #[test]
    fn test_corrupt_seed_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = NodeStore::open(temp_dir.path()).unwrap();

        store.put_raw(keys::DHT_SEED, b"short").unwrap();
        let result = get_or_create_seed(&store, keys::DHT_SEED);

        assert!(matches!(result, Err(IdentityError::InvalidSeedLength(5))));
    }
}
