//! The account value committed to by every leaf.

use serde::{Deserialize, Serialize};
use std::hash::{Hash as StdHash, Hasher};

use crate::crypto::hash::{hash_account, Hash};

/// An address and its balance.
///
/// Two accounts are equal when their addresses are equal. The balance is
/// part of the leaf digest but not of identity, so `Account::new("alice", 0)`
/// looks up the same leaf as `Account::new("alice", 100)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    /// Opaque, non-empty identifier.
    pub address: String,
    /// Signed balance.
    pub balance: i64,
}

impl Account {
    /// Create an account.
    pub fn new(address: impl Into<String>, balance: i64) -> Self {
        Self {
            address: address.into(),
            balance,
        }
    }

    /// Leaf digest of this account.
    pub fn leaf_hash(&self) -> Hash {
        hash_account(&self.address, self.balance)
    }

    /// `true` if this account carries the given address.
    pub fn has_address(&self, address: &str) -> bool {
        self.address == address
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Account {}

impl StdHash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_ignores_balance() {
        assert_eq!(Account::new("alice", 100), Account::new("alice", 0));
        assert_ne!(Account::new("alice", 100), Account::new("bob", 100));
    }

    #[test]
    fn hash_covers_balance() {
        let a = Account::new("alice", 100);
        let b = Account::new("alice", 0);
        assert_ne!(a.leaf_hash(), b.leaf_hash());
        assert_eq!(a.leaf_hash(), hash_account("alice", 100));
    }

    #[test]
    fn set_membership_follows_address() {
        let mut set = HashSet::new();
        set.insert(Account::new("alice", 1));
        assert!(set.contains(&Account::new("alice", 999)));
        assert!(!set.insert(Account::new("alice", 2)));
    }
}
