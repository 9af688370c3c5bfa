//! Transaction Ledger CLI
//!
//! Reads a transaction CSV and writes the final client account states.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > accounts.csv
//! cargo run -- transactions.csv --output accounts.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: `info` prints run statistics, `debug` traces every record

use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;
use transaction_ledger::cli::CliArgs;
use transaction_ledger::{EngineError, LedgerEngine, Result};

fn main() {
    env_logger::init();
    let args = CliArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let file = File::open(&args.input).map_err(|source| EngineError::Open {
        path: args.input.clone(),
        source,
    })?;

    let mut engine = LedgerEngine::new();
    let stats = engine.process_csv(BufReader::new(file))?;
    info!("{}", stats);

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            engine.write_output(BufWriter::new(file))?;
        }
        None => engine.write_output(io::stdout().lock())?,
    }

    Ok(())
}
