//! # Transaction Ledger
//!
//! A bulk ledger engine that applies deposits, withdrawals, disputes,
//! resolves and chargebacks in arrival order and reports the final state of
//! every client account.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 4 decimal places via `rust_decimal`, checked
//! - **Streaming input**: rows are read lazily; memory grows only with the
//!   number of distinct transactions and clients
//! - **Explicit dispute lifecycle**: `Normal -> Disputed -> Resolved | ChargedBack`
//! - **Error containment**: a bad record is skipped and counted, only I/O
//!   failures stop a batch
//! - **Deterministic output**: accounts sorted by client ID
//!
//! ## Example
//!
//! ```
//! use transaction_ledger::LedgerEngine;
//! use std::io::Cursor;
//!
//! let csv = "type,client,tx,amount\ndeposit,1,1,100.0\nwithdrawal,1,2,40\n";
//! let mut engine = LedgerEngine::new();
//! engine.process_csv(Cursor::new(csv)).unwrap();
//!
//! let mut out = Vec::new();
//! engine.write_output(&mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "client,available,held,total,locked\n1,60.0000,0.0000,60.0000,false\n"
//! );
//! ```

pub mod account;
pub mod amount;
pub mod cli;
pub mod dispute;
pub mod engine;
pub mod error;
pub mod history;
pub mod reader;
pub mod report;
pub mod stats;
pub mod transaction;

pub use account::Account;
pub use amount::Amount;
pub use dispute::{DisputeRegistry, DisputeState};
pub use engine::LedgerEngine;
pub use error::{EngineError, RecordError, Result};
pub use history::{EntryKind, HistoryEntry, HistoryStore};
pub use reader::{Row, TransactionReader};
pub use report::AccountSummary;
pub use stats::ProcessStats;
pub use transaction::{ClientId, Transaction, TransactionRecord, TxId, TxKind};
