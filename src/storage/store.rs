// NodeStore - Persistent key-value storage using sled
//
// Each node opens one store at startup. The coordination protocol only
// uses it during identity bootstrap: the long-lived seeds live here,
// plus the host's public key for operators to read out.

use crate::identity::PeerId;
use std::path::Path;
use thiserror::Error;

/// Well-known keys
pub mod keys {
    /// 32-byte seed backing the node's network identity
    pub const DHT_SEED: &[u8] = b"dht-seed";
    /// 32-byte seed backing the host's rpc server identity (host only)
    pub const RPC_SEED: &[u8] = b"rpc-seed";
    /// Hex-encoded public key of the rpc server (host only, informational)
    pub const HOST_PUBLIC_KEY: &[u8] = b"rpc-server-public-key";
}

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    OpenFailed(String),

    #[error("database operation failed: {0}")]
    DatabaseError(String),

    #[error("flush failed: {0}")]
    FlushFailed(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

/// Persistent byte-store for node data
///
/// Uses sled for crash-safe, embedded storage. Opened once per node;
/// only ever touched during identity bootstrap after that.
pub struct NodeStore {
    db: sled::Db,
}

impl NodeStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(Self { db })
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.db.is_empty())
    }

    /// Put raw bytes
    pub fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key, value)?;
        Ok(())
    }

    /// Get raw bytes
    pub fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
        Ok(())
    }

    /// Record the host's public key (informational, hex-encoded)
    pub fn save_host_public_key(&self, id: &PeerId) -> Result<(), StoreError> {
        self.put_raw(keys::HOST_PUBLIC_KEY, id.to_hex().as_bytes())
    }

    /// Read back the recorded host public key, if any
    pub fn load_host_public_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .get_raw(keys::HOST_PUBLIC_KEY)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }
}
