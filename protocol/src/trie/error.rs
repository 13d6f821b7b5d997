//! Errors raised while building an account trie.

use thiserror::Error;

/// Precondition failures of [`MerkleTrie::build`](super::MerkleTrie::build).
///
/// Verification never produces one of these: a failed membership or
/// integrity check is reported as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    /// The account list was empty. A trie needs at least one account.
    #[error("cannot build a trie without any account")]
    Empty,

    /// An account at the given position had an empty address.
    #[error("account at index {index} has an empty address")]
    EmptyAddress {
        /// Position of the offending account in the input list.
        index: usize,
    },
}

pub type TrieResult<T> = Result<T, TrieError>;
