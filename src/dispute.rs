//! Dispute lifecycle of recorded transactions.
//!
//! ```text
//! Normal --dispute--> Disputed --resolve----> Resolved     (terminal)
//!                              \--chargeback-> ChargedBack  (terminal)
//! ```

use crate::error::RecordError;
use crate::transaction::TxId;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisputeState {
    Normal,
    Disputed,
    Resolved,
    ChargedBack,
}

impl DisputeState {
    pub fn is_terminal(self) -> bool {
        matches!(self, DisputeState::Resolved | DisputeState::ChargedBack)
    }
}

impl fmt::Display for DisputeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisputeState::Normal => "normal",
            DisputeState::Disputed => "disputed",
            DisputeState::Resolved => "resolved",
            DisputeState::ChargedBack => "charged back",
        };
        f.write_str(name)
    }
}

/// Dispute state per transaction ID.
///
/// Only IDs registered through [`DisputeRegistry::track`] are known. Every
/// transition on an unknown ID fails with [`RecordError::InvalidTransition`].
#[derive(Debug, Default)]
pub struct DisputeRegistry {
    states: HashMap<TxId, DisputeState>,
    open: usize,
}

impl DisputeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly recorded transaction in [`DisputeState::Normal`].
    /// Already tracked IDs keep their state.
    pub fn track(&mut self, tx: TxId) {
        self.states.entry(tx).or_insert(DisputeState::Normal);
    }

    pub fn state(&self, tx: TxId) -> Option<DisputeState> {
        self.states.get(&tx).copied()
    }

    /// Number of transactions currently in [`DisputeState::Disputed`].
    pub fn open_disputes(&self) -> usize {
        self.open
    }

    /// Normal -> Disputed.
    pub fn begin_dispute(&mut self, tx: TxId) -> Result<(), RecordError> {
        self.transition(tx, DisputeState::Normal, DisputeState::Disputed, "dispute")?;
        self.open += 1;
        Ok(())
    }

    /// Disputed -> Resolved.
    pub fn resolve(&mut self, tx: TxId) -> Result<(), RecordError> {
        self.transition(tx, DisputeState::Disputed, DisputeState::Resolved, "resolve")?;
        self.open -= 1;
        Ok(())
    }

    /// Disputed -> ChargedBack.
    pub fn chargeback(&mut self, tx: TxId) -> Result<(), RecordError> {
        self.transition(
            tx,
            DisputeState::Disputed,
            DisputeState::ChargedBack,
            "charge back",
        )?;
        self.open -= 1;
        Ok(())
    }

    /// Checks that `tx` may take the given step without changing anything.
    pub fn check(&self, tx: TxId, from: DisputeState, action: &'static str) -> Result<(), RecordError> {
        match self.states.get(&tx) {
            Some(&state) if state == from => Ok(()),
            Some(&state) => Err(RecordError::InvalidTransition { tx, state, action }),
            // untracked: nothing to dispute, resolve or charge back
            None => Err(RecordError::InvalidTransition {
                tx,
                state: DisputeState::Normal,
                action,
            }),
        }
    }

    fn transition(
        &mut self,
        tx: TxId,
        from: DisputeState,
        to: DisputeState,
        action: &'static str,
    ) -> Result<(), RecordError> {
        self.check(tx, from, action)?;
        self.states.insert(tx, to);
        Ok(())
    }
}
