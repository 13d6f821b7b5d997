//! Copy-on-rebuild handle for a trie read by many threads.
//!
//! Readers take an `Arc<MerkleTrie>` snapshot and verify against it without
//! holding any lock. A rebuild constructs the next trie off to the side and
//! only then swaps the pointer, so a reader never sees a half-built tree.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::crypto::hash::Hash;

use super::account::Account;
use super::error::TrieResult;
use super::merkle::MerkleTrie;

/// Thread-safe holder of the current trie snapshot.
#[derive(Debug)]
pub struct SharedTrie {
    current: RwLock<Arc<MerkleTrie>>,
}

impl SharedTrie {
    /// Wrap an already built trie.
    pub fn new(trie: MerkleTrie) -> Self {
        Self {
            current: RwLock::new(Arc::new(trie)),
        }
    }

    /// Build the initial trie from `accounts`.
    pub fn build(accounts: Vec<Account>) -> TrieResult<Self> {
        MerkleTrie::build(accounts).map(Self::new)
    }

    /// The current snapshot. Stays valid across later rebuilds.
    pub fn snapshot(&self) -> Arc<MerkleTrie> {
        self.current.read().clone()
    }

    /// Root hash of the current snapshot.
    pub fn root_hash(&self) -> Hash {
        self.current.read().root_hash()
    }

    /// Build a trie from `accounts` and make it current.
    ///
    /// On error the current snapshot is unchanged.
    pub fn rebuild(&self, accounts: Vec<Account>) -> TrieResult<Arc<MerkleTrie>> {
        let next = Arc::new(MerkleTrie::build(accounts)?);
        self.swap(Arc::clone(&next));
        Ok(next)
    }

    /// Make an already built trie current.
    pub fn replace(&self, trie: MerkleTrie) -> Arc<MerkleTrie> {
        let next = Arc::new(trie);
        self.swap(Arc::clone(&next));
        next
    }

    fn swap(&self, next: Arc<MerkleTrie>) {
        let previous = std::mem::replace(&mut *self.current.write(), next);
        tracing::debug!(
            previous = %hex::encode(previous.root_hash()),
            "trie snapshot swapped"
        );
    }
}
