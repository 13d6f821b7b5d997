//! # Account Trie
//!
//! The authenticated data structure at the heart of SU-chain: a binary
//! SHA-256 hash tree over an ordered account list.
//!
//! ```text
//! account.rs — Account value type (equality by address)
//! node.rs    — Arena nodes, leaf/internal variants, parent links
//! merkle.rs  — Build, verify, list, rebuild
//! shared.rs  — Copy-on-rebuild snapshot handle for concurrent readers
//! error.rs   — Build preconditions
//! ```
//!
//! ## Example
//!
//! ```
//! use suchain_protocol::trie::{Account, MerkleTrie};
//!
//! let trie = MerkleTrie::build(vec![
//!     Account::new("alice", 100),
//!     Account::new("bob", 50),
//! ])
//! .unwrap();
//!
//! assert!(trie.verify_account(&Account::new("alice", 0)));
//! assert!(!trie.verify_account(&Account::new("carol", 0)));
//! assert_eq!(trie.list_accounts().len(), 2);
//! ```

pub mod account;
pub mod error;
pub mod merkle;
pub mod node;
pub mod shared;

pub use account::Account;
pub use error::{TrieError, TrieResult};
pub use merkle::MerkleTrie;
pub use node::{Node, NodeId, NodeKind};
pub use shared::SharedTrie;
