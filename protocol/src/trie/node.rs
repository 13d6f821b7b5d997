//! Arena nodes of the account trie.
//!
//! Nodes live in a `Vec` owned by the trie and refer to each other by
//! [`NodeId`]. Child links point down, the parent link points up, and
//! neither owns anything, so the tree drops as one flat vector.

use crate::crypto::hash::{hash_pair, Hash};

/// Index of a node inside its trie's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// What a node is backed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Backed by one account of the trie's account list.
    Leaf {
        /// Index into the trie's account list.
        account: usize,
        /// `true` for the padding copy of the last leaf.
        duplicate: bool,
    },
    /// Backed by two children. `left == right` when a level had an odd
    /// node out and it was paired with itself.
    Internal { left: NodeId, right: NodeId },
}

/// One node of the trie.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) hash: Hash,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn leaf(account: usize, hash: Hash, duplicate: bool) -> Self {
        Self {
            parent: None,
            hash,
            kind: NodeKind::Leaf { account, duplicate },
        }
    }

    pub(crate) fn internal(left: NodeId, right: NodeId, hash: Hash) -> Self {
        Self {
            parent: None,
            hash,
            kind: NodeKind::Internal { left, right },
        }
    }

    /// Stored digest.
    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    /// Parent link; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// `true` for a padding leaf.
    pub fn is_duplicate(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { duplicate: true, .. })
    }
}

/// Digest of the subtree under `id`, recomputed from the leaf layer up.
///
/// Only leaf hashes are read. No internal node's stored hash feeds the
/// result, so a corrupted internal value stays local to its own check.
pub(crate) fn subtree_digest(nodes: &[Node], id: NodeId) -> Hash {
    match nodes[id.0].kind {
        NodeKind::Leaf { .. } => nodes[id.0].hash,
        NodeKind::Internal { left, right } if left == right => {
            let child = subtree_digest(nodes, left);
            hash_pair(&child, &child)
        }
        NodeKind::Internal { left, right } => {
            hash_pair(&subtree_digest(nodes, left), &subtree_digest(nodes, right))
        }
    }
}
