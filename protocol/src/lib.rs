// Copyright (c) 2026 SU-chain contributors. MIT License.
// See LICENSE for details.

//! # SU-chain Protocol — Core Library
//!
//! An authenticated summary of account balances. The ordered account list is
//! committed to by a binary SHA-256 Merkle trie; anyone holding the root hash
//! can have a node recompute the path from an account's leaf to the root and
//! learn whether that account is part of the committed state.
//!
//! ## Architecture
//!
//! - **crypto** — SHA-256 leaf and pair hashing rules.
//! - **trie** — Account model, trie construction, verification, listing, and
//!   the copy-on-rebuild snapshot handle.
//! - **storage** — Length-prefixed account list codec and the sled snapshot
//!   store.
//! - **ledger** — Genesis, verified balance lookups, and transfers.
//! - **config** — Hashing, encoding, and storage constants.
//!
//! ## Example
//!
//! ```
//! use suchain_protocol::trie::{Account, MerkleTrie};
//!
//! let accounts = vec![Account::new("alice", 100), Account::new("bob", 50)];
//! let trie = MerkleTrie::build(accounts).unwrap();
//!
//! assert!(trie.verify_account(&Account::new("bob", 0)));
//! assert_eq!(trie.root_hash().len(), 32);
//! ```

pub mod config;
pub mod crypto;
pub mod ledger;
pub mod storage;
pub mod trie;

pub use ledger::{Ledger, LedgerError, LedgerResult};
pub use trie::{Account, MerkleTrie, SharedTrie, TrieError};
