//! # Cryptographic Primitives
//!
//! SU-chain needs exactly one primitive: SHA-256. This module wraps the
//! `sha2` crate with the two hashing rules the account trie commits to.

pub mod hash;

pub use hash::{hash_account, hash_pair, sha256_array, Hash};
