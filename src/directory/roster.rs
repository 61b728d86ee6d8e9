// PeerDirectory - insertion-ordered peer membership
//
// Presence is boolean membership keyed by PeerId; no extra metadata.
// Iteration order is insertion order, which makes broadcast order
// deterministic and reproducible.

use crate::identity::PeerId;

/// Set of registered peer identities, enumerated in insertion order
#[derive(Clone, Debug, Default)]
pub struct PeerDirectory {
    members: Vec<PeerId>,
}

impl PeerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer. Idempotent on membership: a duplicate insert
    /// returns false and keeps the peer's original position.
    pub fn insert(&mut self, peer: PeerId) -> bool {
        if self.members.contains(&peer) {
            return false;
        }
        self.members.push(peer);
        true
    }

    pub fn remove(&mut self, peer: &PeerId) -> bool {
        let before = self.members.len();
        self.members.retain(|p| p != peer);
        self.members.len() != before
    }

    pub fn contains(&self, peer: &PeerId) -> bool {
        self.members.contains(peer)
    }

    /// Members in insertion order
    pub fn members(&self) -> &[PeerId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
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
    fn test_insertion_order_preserved() {
        let mut dir = PeerDirectory::new();
        dir.insert(peer(3));
        dir.insert(peer(1));
        dir.insert(peer(2));

        assert_eq!(dir.members(), &[peer(3), peer(1), peer(2)]);
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let mut dir = PeerDirectory::new();
        assert!(dir.insert(peer(1)));
        assert!(dir.insert(peer(2)));
        assert!(!dir.insert(peer(1)));

        assert_eq!(dir.len(), 2);
        // Re-registration does not move the peer to the back
        assert_eq!(dir.members(), &[peer(1), peer(2)]);
    }

    #[test]
    fn test_remove() {
        let mut dir = PeerDirectory::new();
        dir.insert(peer(1));

        assert!(dir.remove(&peer(1)));
        assert!(!dir.remove(&peer(1)));
        assert!(dir.is_empty());
    }
}
