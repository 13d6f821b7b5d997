//! # Account List Codec
//!
//! Byte formats for handing account lists to persistence.
//!
//! A single account is `bincode(Account)`. A list is a sequence of records,
//! each a 4-byte big-endian length followed by that many bytes:
//!
//! ```text
//! +----------+------------------+----------+------------------+----
//! | len (BE) | bincode(account) | len (BE) | bincode(account) | ...
//! +----------+------------------+----------+------------------+----
//! ```
//!
//! There is no separator token, so no address can break the split. An empty
//! blob is an empty list.

use bincode::Options;
use thiserror::Error;

use crate::config::{MAX_RECORD_LENGTH, RECORD_LENGTH_PREFIX};
use crate::trie::Account;

/// Failures while encoding or decoding persisted accounts.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Fewer than four bytes remained where a length prefix was expected.
    #[error("truncated length prefix at offset {offset}")]
    TruncatedPrefix { offset: usize },

    /// A prefix announced more bytes than the blob holds.
    #[error("record at offset {offset} needs {expected} bytes, {available} available")]
    TruncatedRecord {
        offset: usize,
        expected: usize,
        available: usize,
    },

    /// A prefix announced a record larger than any valid account.
    #[error("record at offset {offset} claims {length} bytes, above the record limit")]
    RecordTooLarge { offset: usize, length: usize },

    /// An account could not be serialized.
    #[error("failed to encode account record: {0}")]
    Encode(String),

    /// The record bytes are not a valid account encoding.
    #[error("malformed account record: {0}")]
    Malformed(String),

    /// The record decoded to an account with an empty address.
    #[error("decoded account has an empty address")]
    EmptyAddress,
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Fixed-width integers, and a record must be consumed to its last byte.
fn record_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encode one account.
pub fn encode_account(account: &Account) -> CodecResult<Vec<u8>> {
    record_options()
        .serialize(account)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode one account produced by [`encode_account`].
///
/// Bytes left over after the account are an error.
pub fn decode_account(bytes: &[u8]) -> CodecResult<Account> {
    let account: Account = record_options()
        .deserialize(bytes)
        .map_err(|e| CodecError::Malformed(e.to_string()))?;
    if account.address.is_empty() {
        return Err(CodecError::EmptyAddress);
    }
    Ok(account)
}

/// Join accounts into one length-prefixed blob.
pub fn encode_account_list(accounts: &[Account]) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    for account in accounts {
        let record = encode_account(account)?;
        if record.len() > MAX_RECORD_LENGTH {
            return Err(CodecError::RecordTooLarge {
                offset: out.len(),
                length: record.len(),
            });
        }
        out.extend_from_slice(&(record.len() as u32).to_be_bytes());
        out.extend_from_slice(&record);
    }
    Ok(out)
}

/// Split a blob produced by [`encode_account_list`] back into accounts.
pub fn decode_account_list(blob: &[u8]) -> CodecResult<Vec<Account>> {
    let mut accounts = Vec::new();
    let mut offset = 0;

    while offset < blob.len() {
        let prefix_end = offset + RECORD_LENGTH_PREFIX;
        let prefix: [u8; RECORD_LENGTH_PREFIX] = blob
            .get(offset..prefix_end)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(CodecError::TruncatedPrefix { offset })?;

        let length = u32::from_be_bytes(prefix) as usize;
        if length > MAX_RECORD_LENGTH {
            return Err(CodecError::RecordTooLarge { offset, length });
        }

        let record = blob
            .get(prefix_end..prefix_end + length)
            .ok_or(CodecError::TruncatedRecord {
                offset,
                expected: length,
                available: blob.len() - prefix_end,
            })?;

        accounts.push(decode_account(record)?);
        offset = prefix_end + length;
    }

    Ok(accounts)
}
