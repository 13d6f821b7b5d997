//! # Storage Module
//!
//! Everything that turns an in-memory account list into bytes and back.
//!
//! ```text
//! codec.rs — Length-prefixed account list encoding
//! db.rs    — sled store for the account list and its root hash
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Account> ──encode──▶ blob ──▶ AccountDB (state tree)
//!      ▲                                  │
//!      └──── MerkleTrie::build ◀──decode──┘   (root hash checked on load)
//! ```
//!
//! Bincode is used for the per-account record: compact, deterministic, and
//! already what the rest of the ecosystem persists with.

pub mod codec;
pub mod db;

pub use codec::{
    decode_account, decode_account_list, encode_account, encode_account_list, CodecError,
};
pub use db::{AccountDB, DbError, DbResult};
