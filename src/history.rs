//! Append-only history of deposits and withdrawals.
//!
//! Disputes, resolves and chargebacks carry no amount of their own; they are
//! resolved against the entry recorded here under the referenced ID. Entries
//! are never removed or modified, so the store grows with the number of
//! distinct deposits and withdrawals seen.

use crate::amount::Amount;
use crate::error::RecordError;
use crate::transaction::{ClientId, TxId};
use std::collections::HashMap;

/// Which side of the ledger a recorded transaction moved funds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Deposit,
    Withdrawal,
}

/// A recorded deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Client who owns the transaction
    pub client: ClientId,
    pub kind: EntryKind,
    /// Original amount
    pub amount: Amount,
}

impl HistoryEntry {
    pub fn deposit(client: ClientId, amount: Amount) -> Self {
        HistoryEntry {
            client,
            kind: EntryKind::Deposit,
            amount,
        }
    }

    pub fn withdrawal(client: ClientId, amount: Amount) -> Self {
        HistoryEntry {
            client,
            kind: EntryKind::Withdrawal,
            amount,
        }
    }
}

/// Lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound(pub TxId);

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: HashMap<TxId, HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a deposit or withdrawal.
    ///
    /// The first entry under an ID wins; a later one is rejected with
    /// [`RecordError::DuplicateTxId`] and leaves the stored entry untouched.
    pub fn record(&mut self, tx: TxId, entry: HistoryEntry) -> Result<(), RecordError> {
        use std::collections::hash_map::Entry;

        match self.entries.entry(tx) {
            Entry::Occupied(_) => Err(RecordError::DuplicateTxId { tx }),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, tx: TxId) -> Result<&HistoryEntry, NotFound> {
        self.entries.get(&tx).ok_or(NotFound(tx))
    }

    pub fn contains(&self, tx: TxId) -> bool {
        self.entries.contains_key(&tx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
