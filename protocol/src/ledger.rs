//! # Ledger
//!
//! Account-level operations on top of the trie and the snapshot store:
//! genesis, balance queries, and transfers.
//!
//! Every balance read goes through [`MerkleTrie::verify_address`] first, so
//! an account whose path to the root does not check out is treated as
//! absent. A transfer never touches the live trie. It edits a copy of the
//! account list, builds the next trie, persists it, and only then swaps it
//! in. Readers holding the previous snapshot are unaffected.

use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

use crate::config::GENESIS_REWARD;
use crate::crypto::hash::Hash;
use crate::storage::db::{AccountDB, DbError};
use crate::trie::{Account, MerkleTrie, SharedTrie, TrieError};

/// Errors surfaced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger has not been initialized")]
    NotInitialized,

    #[error("ledger is already initialized")]
    AlreadyInitialized,

    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("account {0} is present but failed verification")]
    Unverified(String),

    #[error("transfer amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("cannot transfer from {0} to itself")]
    SelfTransfer(String),

    #[error("insufficient funds for {address}: have {balance}, need {required}")]
    InsufficientFunds {
        address: String,
        balance: i64,
        required: i64,
    },

    #[error("balance overflow crediting {0}")]
    BalanceOverflow(String),

    #[error(transparent)]
    Trie(#[from] TrieError),

    #[error(transparent)]
    Db(#[from] DbError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Persistent account ledger committed to by a Merkle trie.
#[derive(Debug)]
pub struct Ledger {
    db: AccountDB,
    trie: Option<SharedTrie>,
    /// Serializes transfers; reads never take it.
    writer: Mutex<()>,
}

impl Ledger {
    /// Open a ledger over `db`, loading the persisted snapshot if any.
    pub fn open(db: AccountDB) -> LedgerResult<Self> {
        let trie = db.load_trie()?.map(SharedTrie::new);
        if let Some(shared) = &trie {
            tracing::info!(root = %hex::encode(shared.root_hash()), "ledger loaded");
        }
        Ok(Self {
            db,
            trie,
            writer: Mutex::new(()),
        })
    }

    /// `true` once a genesis account exists.
    pub fn is_initialized(&self) -> bool {
        self.trie.is_some()
    }

    /// Create the ledger with a single account holding [`GENESIS_REWARD`].
    pub fn init(&mut self, address: &str) -> LedgerResult<Hash> {
        if self.trie.is_some() || self.db.is_initialized()? {
            return Err(LedgerError::AlreadyInitialized);
        }

        let trie = MerkleTrie::build(vec![Account::new(address, GENESIS_REWARD)])?;
        self.db.put_snapshot(&trie)?;
        let root = trie.root_hash();
        self.trie = Some(SharedTrie::new(trie));

        tracing::info!(address, reward = GENESIS_REWARD, root = %hex::encode(root), "ledger initialized");
        Ok(root)
    }

    /// Current trie snapshot.
    pub fn snapshot(&self) -> LedgerResult<Arc<MerkleTrie>> {
        Ok(self.shared()?.snapshot())
    }

    /// Current root hash.
    pub fn root_hash(&self) -> LedgerResult<Hash> {
        Ok(self.shared()?.root_hash())
    }

    /// Current accounts in commitment order.
    pub fn accounts(&self) -> LedgerResult<Vec<Account>> {
        Ok(self.snapshot()?.list_accounts())
    }

    /// Whether `address` is committed to by the current root.
    pub fn verify(&self, address: &str) -> LedgerResult<bool> {
        Ok(self.snapshot()?.verify_address(address))
    }

    /// Verified balance of `address`, `None` if it does not verify.
    pub fn balance(&self, address: &str) -> LedgerResult<Option<i64>> {
        let snapshot = self.snapshot()?;
        if !snapshot.verify_address(address) {
            return Ok(None);
        }
        Ok(snapshot.get(address).map(|acc| acc.balance))
    }

    /// Move `amount` from `from` to `to` and return the new root.
    ///
    /// The recipient is created with `amount` if it does not exist yet.
    pub fn transfer(&self, from: &str, to: &str, amount: i64) -> LedgerResult<Hash> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if from == to {
            return Err(LedgerError::SelfTransfer(from.to_string()));
        }

        let shared = self.shared()?;
        let _guard = self.writer.lock();
        let current = shared.snapshot();

        require_verified(&current, from)?;
        let recipient_exists = match require_verified(&current, to) {
            Ok(()) => true,
            Err(LedgerError::UnknownAccount(_)) => false,
            Err(e) => return Err(e),
        };

        let mut accounts = current.list_accounts();

        let sender = first_mut(&mut accounts, from)
            .ok_or_else(|| LedgerError::UnknownAccount(from.to_string()))?;
        if sender.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                address: from.to_string(),
                balance: sender.balance,
                required: amount,
            });
        }
        sender.balance -= amount;

        if recipient_exists {
            let recipient = first_mut(&mut accounts, to)
                .ok_or_else(|| LedgerError::UnknownAccount(to.to_string()))?;
            recipient.balance = recipient
                .balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::BalanceOverflow(to.to_string()))?;
        } else {
            accounts.push(Account::new(to, amount));
        }

        let next = MerkleTrie::build(accounts)?;
        self.db.put_snapshot(&next)?;
        let root = shared.replace(next).root_hash();

        tracing::info!(
            from,
            to,
            amount,
            new_account = !recipient_exists,
            root = %hex::encode(root),
            "transfer applied"
        );
        Ok(root)
    }

    fn shared(&self) -> LedgerResult<&SharedTrie> {
        self.trie.as_ref().ok_or(LedgerError::NotInitialized)
    }
}

fn require_verified(trie: &MerkleTrie, address: &str) -> LedgerResult<()> {
    if trie.verify_address(address) {
        Ok(())
    } else if trie.get(address).is_some() {
        tracing::warn!(address, "account present but failed verification");
        Err(LedgerError::Unverified(address.to_string()))
    } else {
        Err(LedgerError::UnknownAccount(address.to_string()))
    }
}

fn first_mut<'a>(accounts: &'a mut [Account], address: &str) -> Option<&'a mut Account> {
    accounts.iter_mut().find(|acc| acc.has_address(address))
}
