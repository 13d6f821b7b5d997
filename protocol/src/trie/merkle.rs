//! # Merkle Account Trie
//!
//! A binary hash tree over an ordered account list:
//!
//! ```text
//! leaves = [ H(a0), H(a1), ..., H(an) ]      (+ copy of H(an) if n is odd)
//! level  = [ P(l0, l1), P(l2, l3), ... ]     (odd node out pairs with itself)
//! root   = the single node left
//! ```
//!
//! `H` is [`hash_account`](crate::crypto::hash::hash_account) and `P` is
//! [`hash_pair`]. Input order is part of the commitment: the same accounts
//! in a different order produce a different root.
//!
//! A built trie never changes. A new account list means a new trie, either
//! through [`MerkleTrie::rebuild`] or through
//! [`SharedTrie`](super::SharedTrie) for trees shared between threads.

use crate::config::MIN_LEAF_COUNT;
use crate::crypto::hash::{hash_pair, Hash};

use super::account::Account;
use super::error::{TrieError, TrieResult};
use super::node::{subtree_digest, Node, NodeId, NodeKind};

/// Authenticated summary of an ordered account list.
#[derive(Debug, Clone)]
pub struct MerkleTrie {
    /// Accounts in input order. Leaves point into this list.
    accounts: Vec<Account>,
    /// Node arena. Leaves come first, in leaf order.
    nodes: Vec<Node>,
    /// Leaf layer, real leaves followed by the optional padding leaf.
    leaves: Vec<NodeId>,
    root: NodeId,
    root_hash: Hash,
}

impl MerkleTrie {
    /// Build a trie from an ordered, non-empty account list.
    ///
    /// # Errors
    ///
    /// [`TrieError::Empty`] for an empty list and
    /// [`TrieError::EmptyAddress`] if any address is empty.
    pub fn build(accounts: Vec<Account>) -> TrieResult<Self> {
        if accounts.is_empty() {
            return Err(TrieError::Empty);
        }
        if let Some(index) = accounts.iter().position(|acc| acc.address.is_empty()) {
            return Err(TrieError::EmptyAddress { index });
        }

        let leaf_count = accounts.len().next_multiple_of(MIN_LEAF_COUNT);
        let mut nodes = Vec::with_capacity(leaf_count * 2);

        for (idx, account) in accounts.iter().enumerate() {
            nodes.push(Node::leaf(idx, account.leaf_hash(), false));
        }

        if leaf_count > accounts.len() {
            let last = accounts.len() - 1;
            let hash = nodes[last].hash;
            nodes.push(Node::leaf(last, hash, true));
        }

        let leaves: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();
        let root = build_levels(&mut nodes, leaves.clone());
        let root_hash = nodes[root.0].hash;

        tracing::debug!(
            accounts = accounts.len(),
            leaves = leaves.len(),
            nodes = nodes.len(),
            root = %hex::encode(root_hash),
            "account trie built"
        );

        Ok(Self {
            accounts,
            nodes,
            leaves,
            root,
            root_hash,
        })
    }

    /// Replace this trie with one built from `accounts`.
    ///
    /// The new tree is complete before it replaces the old one. On error
    /// `self` is left untouched.
    pub fn rebuild(&mut self, accounts: Vec<Account>) -> TrieResult<()> {
        *self = Self::build(accounts)?;
        Ok(())
    }

    /// Cached root hash.
    pub fn root_hash(&self) -> Hash {
        self.root_hash
    }

    /// Root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Leaf layer, padding included.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Number of leaves, padding included. Always even and at least 2.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of real accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Always `false`: a trie holds at least one account.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// First real account with the given address.
    pub fn get(&self, address: &str) -> Option<&Account> {
        self.accounts().find(|acc| acc.has_address(address))
    }

    /// Check that an account with `candidate`'s address is committed to by
    /// this trie and that every hash on its path to the root is consistent.
    ///
    /// Each node on the path is compared against a digest rebuilt from the
    /// leaf layer. A corrupted internal node therefore fails exactly the
    /// leaves whose path crosses it.
    ///
    /// Only the address of `candidate` is used for the lookup.
    pub fn verify_account(&self, candidate: &Account) -> bool {
        self.verify_address(&candidate.address)
    }

    /// Same as [`verify_account`](Self::verify_account), keyed by address.
    pub fn verify_address(&self, address: &str) -> bool {
        let Some(leaf_id) = self.find_leaf(address) else {
            return false;
        };

        let leaf = &self.nodes[leaf_id.0];
        if let NodeKind::Leaf { account, .. } = leaf.kind {
            if leaf.hash != self.accounts[account].leaf_hash() {
                tracing::warn!(address, "leaf hash does not match its account");
                return false;
            }
        }

        let mut below = leaf_id;
        let mut digest = leaf.hash;
        let mut current = leaf.parent;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            let NodeKind::Internal { left, right } = node.kind else {
                tracing::warn!(address, node = id.0, "leaf found above the leaf layer");
                return false;
            };

            let side = |child: NodeId| {
                if child == below {
                    digest
                } else {
                    subtree_digest(&self.nodes, child)
                }
            };
            let recomputed = hash_pair(&side(left), &side(right));
            if recomputed != node.hash {
                tracing::warn!(
                    address,
                    node = id.0,
                    stored = %hex::encode(node.hash),
                    recomputed = %hex::encode(recomputed),
                    "hash mismatch on path to root"
                );
                return false;
            }

            below = id;
            digest = recomputed;
            current = node.parent;
        }

        true
    }

    /// Real accounts in leaf order, padding excluded.
    pub fn list_accounts(&self) -> Vec<Account> {
        self.accounts().cloned().collect()
    }

    /// Iterate over real accounts in leaf order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.leaves
            .iter()
            .filter_map(move |id| match self.nodes[id.0].kind {
                NodeKind::Leaf {
                    account,
                    duplicate: false,
                } => Some(&self.accounts[account]),
                _ => None,
            })
    }

    fn find_leaf(&self, address: &str) -> Option<NodeId> {
        self.leaves.iter().copied().find(|id| {
            matches!(
                self.nodes[id.0].kind,
                NodeKind::Leaf { account, .. } if self.accounts[account].has_address(address)
            )
        })
    }
}

/// Pair `level` bottom-up until one node remains and return it.
///
/// A trailing single node pairs with itself. The leaf layer is always even,
/// so this only happens on internal levels (e.g. 6 leaves -> 3 parents).
fn build_levels(nodes: &mut Vec<Node>, mut level: Vec<NodeId>) -> NodeId {
    loop {
        let mut parents = Vec::with_capacity((level.len() + 1) / 2);

        for pair in level.chunks(2) {
            let left = pair[0];
            let right = pair.get(1).copied().unwrap_or(left);

            let hash = hash_pair(&nodes[left.0].hash, &nodes[right.0].hash);
            let parent = NodeId(nodes.len());
            nodes.push(Node::internal(left, right, hash));

            nodes[left.0].parent = Some(parent);
            nodes[right.0].parent = Some(parent);
            parents.push(parent);
        }

        if parents.len() == 1 {
            return parents[0];
        }
        level = parents;
    }
}
