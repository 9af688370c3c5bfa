//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Apply a CSV of transactions and print the final client balances
#[derive(Parser, Debug)]
#[command(name = "transaction-ledger", version)]
#[command(about = "Apply a CSV of transactions and print the final client balances", long_about = None)]
pub struct CliArgs {
    /// Input CSV with columns type, client, tx, amount
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the account CSV here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}
