// Copyright (c) 2026 SU-chain contributors. MIT License.
// See LICENSE for details.

//! # SU-chain Node
//!
//! Entry point for the `suchain-node` binary. Parses CLI arguments,
//! initializes logging, opens the ledger database, and runs one command:
//!
//! - `init`     — create the ledger with a genesis account
//! - `balance`  — print a verified balance
//! - `send`     — transfer between accounts
//! - `accounts` — list accounts and the root hash
//! - `verify`   — check an address against the root
//! - `version`  — print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;

use suchain_protocol::storage::db::AccountDB;
use suchain_protocol::trie::Account;
use suchain_protocol::Ledger;

use cli::{Commands, SuchainCli};

fn main() -> Result<()> {
    let cli = SuchainCli::parse();
    logging::init_logging(
        "suchain_node=info,suchain_protocol=warn",
        cli.log_format.into(),
    );

    match cli.command {
        Commands::Init(args) => init_ledger(&cli.data_dir, &args.address),
        Commands::Balance(args) => print_balance(&cli.data_dir, &args.address),
        Commands::Send(args) => send(&cli.data_dir, &args.from, &args.to, args.amount),
        Commands::Accounts(args) => list_accounts(&cli.data_dir, args.json),
        Commands::Verify(args) => verify(&cli.data_dir, &args.address),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Opens the ledger stored under `data_dir`, creating the directory if needed.
fn open_ledger(data_dir: &Path) -> Result<Ledger> {
    let db_path = data_dir.join("db");
    std::fs::create_dir_all(&db_path)
        .with_context(|| format!("failed to create database directory: {}", db_path.display()))?;

    let db = AccountDB::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    tracing::debug!(path = %db_path.display(), "database opened");

    Ledger::open(db).context("failed to load ledger snapshot")
}

/// Opens the ledger and fails unless it has been initialized.
fn open_initialized(data_dir: &Path) -> Result<Ledger> {
    let ledger = open_ledger(data_dir)?;
    if !ledger.is_initialized() {
        bail!(
            "no ledger found in {}; run `suchain-node init --address <ADDRESS>` first",
            data_dir.display()
        );
    }
    Ok(ledger)
}

fn init_ledger(data_dir: &Path, address: &str) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let root = ledger
        .init(address)
        .with_context(|| format!("failed to initialize ledger for {address}"))?;

    println!("Ledger initialized.");
    println!("  Data directory : {}", data_dir.display());
    println!("  Genesis account: {address}");
    println!("  Root hash      : {}", hex::encode(root));
    Ok(())
}

fn print_balance(data_dir: &Path, address: &str) -> Result<()> {
    let ledger = open_initialized(data_dir)?;
    match ledger.balance(address)? {
        Some(balance) => println!("Balance of {address}: {balance}"),
        None => {
            tracing::info!(address, "address did not verify against the current root");
            println!("Balance of {address}: 0 (not in ledger)");
        }
    }
    Ok(())
}

fn send(data_dir: &Path, from: &str, to: &str, amount: i64) -> Result<()> {
    let ledger = open_initialized(data_dir)?;
    let root = ledger
        .transfer(from, to, amount)
        .with_context(|| format!("transfer of {amount} from {from} to {to} failed"))?;

    println!("Transfer succeeded.");
    println!("  New root hash: {}", hex::encode(root));
    Ok(())
}

#[derive(Serialize)]
struct AccountListing<'a> {
    root_hash: String,
    accounts: &'a [Account],
}

fn list_accounts(data_dir: &Path, json: bool) -> Result<()> {
    let ledger = open_initialized(data_dir)?;
    let snapshot = ledger.snapshot()?;
    let accounts = snapshot.list_accounts();
    let root_hash = hex::encode(snapshot.root_hash());

    if json {
        let listing = AccountListing {
            root_hash,
            accounts: &accounts,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Root hash: {root_hash}");
    for account in &accounts {
        println!("  {:<40} {:>20}", account.address, account.balance);
    }
    Ok(())
}

fn verify(data_dir: &Path, address: &str) -> Result<()> {
    let ledger = open_initialized(data_dir)?;
    let verified = ledger.verify(address)?;
    println!("{address}: {}", if verified { "verified" } else { "not verified" });
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("suchain-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol     {}", suchain_protocol::config::PROTOCOL_VERSION);
    println!("hash         {}", suchain_protocol::config::HASH_FUNCTION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_initialized_requires_init() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_initialized(dir.path()).is_err());

        init_ledger(dir.path(), "alice").unwrap();
        let ledger = open_initialized(dir.path()).unwrap();
        assert_eq!(
            ledger.balance("alice").unwrap(),
            Some(suchain_protocol::config::GENESIS_REWARD)
        );
    }

    #[test]
    fn send_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        init_ledger(dir.path(), "alice").unwrap();
        send(dir.path(), "alice", "bob", 10).unwrap();

        let ledger = open_initialized(dir.path()).unwrap();
        assert_eq!(ledger.balance("bob").unwrap(), Some(10));
        assert!(send(dir.path(), "carol", "bob", 1).is_err());
    }
}
