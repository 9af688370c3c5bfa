//! Error types for the ledger engine.
//!
//! Two layers: [`RecordError`] explains why a single record was discarded and
//! never stops a batch; [`EngineError`] is an infrastructure failure that
//! ends the batch.

use crate::amount::Amount;
use crate::dispute::DisputeState;
use crate::transaction::{ClientId, TxId};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fatal engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Fatal errors. The batch stops; state applied so far is kept.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or write a file or stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV failure that is not confined to a single row
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reasons a single record is discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Structurally invalid input row.
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// Referenced transaction is unknown or owned by another client.
    #[error("client {client} references unknown transaction {tx}")]
    UnknownReference { client: ClientId, tx: TxId },

    /// Dispute lifecycle step not allowed from the current state.
    #[error("cannot {action} transaction {tx} while it is {state}")]
    InvalidTransition {
        tx: TxId,
        state: DisputeState,
        action: &'static str,
    },

    #[error("account {client} is locked")]
    AccountLocked { client: ClientId },

    #[error("insufficient funds for client {client}: available {available}, requested {requested}")]
    InsufficientFunds {
        client: ClientId,
        available: Amount,
        requested: Amount,
    },

    /// A second deposit or withdrawal reused a transaction ID.
    #[error("duplicate transaction ID {tx}")]
    DuplicateTxId { tx: TxId },

    #[error("arithmetic overflow on account {client}")]
    Overflow { client: ClientId },
}

impl RecordError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        RecordError::MalformedRecord {
            reason: reason.into(),
        }
    }
}
