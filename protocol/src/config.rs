//! # Protocol Configuration & Constants
//!
//! Every magic number in SU-chain lives here. Runtime settings (data
//! directory, log format) come from the node's CLI flags; these values are
//! part of the commitment format and must not drift between builds.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Version of the hashing and encoding rules. Bump when a root hash computed
/// by an older build would no longer match.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Hash function behind every leaf, internal node, and root.
pub const HASH_FUNCTION: &str = "SHA-256";

/// Digest length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// Width of the big-endian balance field in a leaf preimage.
pub const BALANCE_ENCODING_WIDTH: usize = 8;

/// Leaf layers are padded up to a multiple of this with a copy of the last
/// leaf. A single account therefore still yields an internal root.
pub const MIN_LEAF_COUNT: usize = 2;

// ---------------------------------------------------------------------------
// Account List Encoding
// ---------------------------------------------------------------------------

/// Width of the big-endian length prefix in front of every account record.
pub const RECORD_LENGTH_PREFIX: usize = 4;

/// Largest single account record the decoder accepts. Guards against a
/// corrupt prefix claiming gigabytes.
pub const MAX_RECORD_LENGTH: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// sled tree holding the current ledger snapshot.
pub const STATE_TREE_NAME: &str = "state";

/// Key of the encoded account list inside [`STATE_TREE_NAME`].
pub const ACCOUNT_LIST_KEY: &[u8] = b"account_list";

/// Key of the 32-byte root hash inside [`STATE_TREE_NAME`].
pub const ROOT_HASH_KEY: &[u8] = b"root_hash";

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Balance credited to the first account when a ledger is initialized.
pub const GENESIS_REWARD: i64 = 100;
