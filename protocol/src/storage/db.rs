//! # AccountDB — Ledger Snapshot Store
//!
//! Persists the current account list and its root hash in sled. The trie
//! itself is never stored; it is rebuilt from the list on load and checked
//! against the stored root.
//!
//! ## Tree Layout
//!
//! | Tree    | Key            | Value                          |
//! |---------|----------------|--------------------------------|
//! | `state` | `account_list` | `encode_account_list(accounts)`|
//! | `state` | `root_hash`    | 32-byte root hash              |
//!
//! ## Atomicity
//!
//! Both keys are written in a single `Batch`, so a reader never sees a list
//! from one snapshot next to the root of another.

use sled::{Batch, Db, Tree};
use std::path::Path;

use super::codec::{decode_account_list, encode_account_list, CodecError};
use crate::config::{ACCOUNT_LIST_KEY, HASH_OUTPUT_LENGTH, ROOT_HASH_KEY, STATE_TREE_NAME};
use crate::crypto::hash::Hash;
use crate::trie::{Account, MerkleTrie, TrieError};

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("stored account list cannot form a trie: {0}")]
    Trie(#[from] TrieError),

    #[error("corrupt entry {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("root hash mismatch: stored {stored}, recomputed {computed}")]
    RootMismatch { stored: String, computed: String },
}

pub type DbResult<T> = Result<T, DbError>;

// ---------------------------------------------------------------------------
// AccountDB
// ---------------------------------------------------------------------------

/// Persistent store for ledger snapshots.
///
/// Cloning is cheap; clones share the same sled handles.
#[derive(Debug, Clone)]
pub struct AccountDB {
    db: Db,
    state: Tree,
}

impl AccountDB {
    /// Open or create a database at the given filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Create a temporary database that is removed when dropped.
    pub fn open_temporary() -> DbResult<Self> {
        let config = sled::Config::new().temporary(true);
        let db = config.open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> DbResult<Self> {
        let state = db.open_tree(STATE_TREE_NAME)?;
        Ok(Self { db, state })
    }

    /// Persist a trie's account list and root hash atomically, then flush.
    pub fn put_snapshot(&self, trie: &MerkleTrie) -> DbResult<()> {
        let blob = encode_account_list(&trie.list_accounts())?;
        let root = trie.root_hash();

        let mut batch = Batch::default();
        batch.insert(ACCOUNT_LIST_KEY, blob);
        batch.insert(ROOT_HASH_KEY, root.as_slice());
        self.state.apply_batch(batch)?;
        self.db.flush()?;

        tracing::debug!(
            accounts = trie.len(),
            root = %hex::encode(root),
            "snapshot persisted"
        );
        Ok(())
    }

    /// The persisted account list, or `None` if nothing was stored yet.
    pub fn get_accounts(&self) -> DbResult<Option<Vec<Account>>> {
        match self.state.get(ACCOUNT_LIST_KEY)? {
            Some(bytes) => Ok(Some(decode_account_list(&bytes)?)),
            None => Ok(None),
        }
    }

    /// The persisted root hash, or `None` if nothing was stored yet.
    pub fn get_root_hash(&self) -> DbResult<Option<Hash>> {
        match self.state.get(ROOT_HASH_KEY)? {
            Some(bytes) => {
                let root: Hash = bytes.as_ref().try_into().map_err(|_| DbError::Corrupt {
                    key: String::from_utf8_lossy(ROOT_HASH_KEY).into_owned(),
                    reason: format!("expected {HASH_OUTPUT_LENGTH} bytes, got {}", bytes.len()),
                })?;
                Ok(Some(root))
            }
            None => Ok(None),
        }
    }

    /// Rebuild the trie from the persisted account list.
    ///
    /// Fails with [`DbError::RootMismatch`] if the rebuilt root differs from
    /// the stored one, and with [`DbError::Corrupt`] if only one of the two
    /// keys is present.
    pub fn load_trie(&self) -> DbResult<Option<MerkleTrie>> {
        let (accounts, stored) = match (self.get_accounts()?, self.get_root_hash()?) {
            (None, None) => return Ok(None),
            (Some(accounts), Some(root)) => (accounts, root),
            (Some(_), None) => return Err(missing(ROOT_HASH_KEY)),
            (None, Some(_)) => return Err(missing(ACCOUNT_LIST_KEY)),
        };

        let trie = MerkleTrie::build(accounts)?;
        if trie.root_hash() != stored {
            return Err(DbError::RootMismatch {
                stored: hex::encode(stored),
                computed: hex::encode(trie.root_hash()),
            });
        }
        Ok(Some(trie))
    }

    /// `true` once a snapshot has been stored.
    pub fn is_initialized(&self) -> DbResult<bool> {
        Ok(self.state.contains_key(ACCOUNT_LIST_KEY)?)
    }

    #[cfg(test)]
    fn raw_insert(&self, key: &[u8], value: &[u8]) -> DbResult<()> {
        self.state.insert(key, value)?;
        Ok(())
    }
}

fn missing(key: &[u8]) -> DbError {
    DbError::Corrupt {
        key: String::from_utf8_lossy(key).into_owned(),
        reason: "missing while its counterpart is present".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
