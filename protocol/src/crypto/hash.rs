//! # Hashing Utilities
//!
//! Every digest in SU-chain is SHA-256. The trie commits to accounts with
//! two rules and nothing else:
//!
//! ```text
//! leaf     = SHA-256(address_bytes || balance as i64 big-endian)
//! internal = SHA-256(left_hash || right_hash)
//! ```
//!
//! `hash_pair` is order-sensitive on purpose. Swapping two children yields a
//! different parent, so a forger cannot reorder subtrees and keep the root.

use sha2::{Digest, Sha256};

use crate::config::{BALANCE_ENCODING_WIDTH, HASH_OUTPUT_LENGTH};

/// A SHA-256 digest.
pub type Hash = [u8; HASH_OUTPUT_LENGTH];

/// Compute the SHA-256 hash of `data`.
///
/// # Example
///
/// ```
/// use suchain_protocol::crypto::sha256_array;
///
/// let hash = sha256_array(b"SU-chain");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256_array(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; HASH_OUTPUT_LENGTH];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices as if they were concatenated.
///
/// The parts are fed sequentially into one hasher, so composite preimages
/// like `(address || balance)` never need a temporary buffer.
pub fn sha256_multi(parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; HASH_OUTPUT_LENGTH];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Leaf digest of an account: `SHA-256(address || be_i64(balance))`.
///
/// # Example
///
/// ```
/// use suchain_protocol::crypto::hash::{hash_account, sha256_array};
///
/// let mut preimage = b"alice".to_vec();
/// preimage.extend_from_slice(&100i64.to_be_bytes());
/// assert_eq!(hash_account("alice", 100), sha256_array(&preimage));
/// ```
pub fn hash_account(address: &str, balance: i64) -> Hash {
    let balance: [u8; BALANCE_ENCODING_WIDTH] = balance.to_be_bytes();
    sha256_multi(&[address.as_bytes(), &balance])
}

/// Internal-node digest: `SHA-256(left || right)`.
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    sha256_multi(&[left.as_slice(), right.as_slice()])
}
