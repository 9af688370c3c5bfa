//! Counters for applied and discarded records.

use crate::error::RecordError;
use std::fmt;

/// Outcome counts of a processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub applied: u64,
    pub malformed: u64,
    pub unknown_reference: u64,
    pub invalid_transition: u64,
    pub account_locked: u64,
    pub insufficient_funds: u64,
    pub duplicate_tx_id: u64,
    pub overflow: u64,
}

impl ProcessStats {
    pub fn record(&mut self, outcome: &Result<(), RecordError>) {
        let counter = match outcome {
            Ok(()) => &mut self.applied,
            Err(RecordError::MalformedRecord { .. }) => &mut self.malformed,
            Err(RecordError::UnknownReference { .. }) => &mut self.unknown_reference,
            Err(RecordError::InvalidTransition { .. }) => &mut self.invalid_transition,
            Err(RecordError::AccountLocked { .. }) => &mut self.account_locked,
            Err(RecordError::InsufficientFunds { .. }) => &mut self.insufficient_funds,
            Err(RecordError::DuplicateTxId { .. }) => &mut self.duplicate_tx_id,
            Err(RecordError::Overflow { .. }) => &mut self.overflow,
        };
        *counter += 1;
    }

    /// Records discarded for any reason, malformed ones included.
    pub fn skipped(&self) -> u64 {
        self.malformed
            + self.unknown_reference
            + self.invalid_transition
            + self.account_locked
            + self.insufficient_funds
            + self.duplicate_tx_id
            + self.overflow
    }

    pub fn total(&self) -> u64 {
        self.applied + self.skipped()
    }
}

impl fmt::Display for ProcessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records: {} applied, {} skipped (malformed {}, unknown reference {}, \
             invalid transition {}, account locked {}, insufficient funds {}, \
             duplicate tx {}, overflow {})",
            self.total(),
            self.applied,
            self.skipped(),
            self.malformed,
            self.unknown_reference,
            self.invalid_transition,
            self.account_locked,
            self.insufficient_funds,
            self.duplicate_tx_id,
            self.overflow,
        )
    }
}
