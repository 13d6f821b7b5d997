//! # CLI Interface
//!
//! Defines the command-line argument structure for `suchain-node` using
//! `clap` derive. Subcommands mirror the ledger operations: `init`,
//! `balance`, `send`, `accounts`, `verify`, and `version`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// SU-chain ledger node.
///
/// Keeps an account list committed to by a Merkle trie and answers balance
/// queries only for accounts that verify against the current root.
#[derive(Parser, Debug)]
#[command(
    name = "suchain-node",
    about = "SU-chain account ledger",
    version,
    propagate_version = true
)]
pub struct SuchainCli {
    /// Directory holding the ledger database. Created on first use.
    #[arg(
        long,
        short = 'd',
        global = true,
        env = "SUCHAIN_DATA_DIR",
        default_value = "./suchain-data"
    )]
    pub data_dir: PathBuf,

    /// Log output format.
    #[arg(long, global = true, env = "SUCHAIN_LOG_FORMAT", value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Log format selector.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the ledger and credit the genesis reward to an address.
    Init(AddressArgs),
    /// Print the verified balance of an address.
    Balance(AddressArgs),
    /// Transfer an amount between two addresses.
    Send(SendArgs),
    /// List all accounts and the current root hash.
    Accounts(AccountsArgs),
    /// Check whether an address verifies against the current root.
    Verify(AddressArgs),
    /// Print version information and exit.
    Version,
}

/// A single address argument.
#[derive(Parser, Debug)]
pub struct AddressArgs {
    #[arg(long, short = 'a')]
    pub address: String,
}

/// Arguments for the `send` subcommand.
#[derive(Parser, Debug)]
pub struct SendArgs {
    /// Sender address. Must exist and hold at least `amount`.
    #[arg(long)]
    pub from: String,

    /// Recipient address. Created if it does not exist.
    #[arg(long)]
    pub to: String,

    /// Amount to move. Must be positive.
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub amount: i64,
}

/// Arguments for the `accounts` subcommand.
#[derive(Parser, Debug)]
pub struct AccountsArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        SuchainCli::command().debug_assert();
    }

    #[test]
    fn parses_send() {
        let cli = SuchainCli::try_parse_from([
            "suchain-node", "send", "--from", "alice", "--to", "bob", "--amount", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.from, "alice");
                assert_eq!(args.to, "bob");
                assert_eq!(args.amount, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_amount() {
        let res = SuchainCli::try_parse_from([
            "suchain-node", "send", "--from", "alice", "--to", "bob", "--amount", "0",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = SuchainCli::try_parse_from([
            "suchain-node", "balance", "--address", "alice", "--data-dir", "/tmp/x", "--log-format", "json",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
        assert_eq!(cli.log_format, LogFormatArg::Json);
    }
}
