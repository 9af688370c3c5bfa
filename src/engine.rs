//! Core ledger engine.
//!
//! Applies transactions strictly in arrival order and is the only code that
//! mutates accounts, the transaction history and dispute state. A record that
//! breaks a business rule is discarded on its own; the stream goes on.

use crate::account::Account;
use crate::amount::Amount;
use crate::dispute::{DisputeRegistry, DisputeState};
use crate::error::{RecordError, Result};
use crate::history::{EntryKind, HistoryEntry, HistoryStore};
use crate::reader::{Row, TransactionReader};
use crate::report::{self, AccountSummary};
use crate::stats::ProcessStats;
use crate::transaction::{ClientId, Transaction, TxId};
use log::{debug, warn};
use std::collections::HashMap;
use std::io::{Read, Write};

/// The ledger engine.
///
/// Accounts are created on the first record that names their client, even
/// when that record is then discarded.
///
/// # Atomicity
///
/// A record either changes the account, the history and the dispute
/// registry together, or changes none of them: account updates are staged on
/// a copy and stored only after every check passed.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    accounts: HashMap<ClientId, Account>,
    history: HistoryStore,
    disputes: DisputeRegistry,
    stats: ProcessStats,
}

impl LedgerEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes rows in order until the stream ends or fails.
    ///
    /// Malformed rows and rejected records are logged, counted and skipped.
    /// A fatal error is returned as-is; everything applied before it stays.
    pub fn process<I>(&mut self, rows: I) -> Result<&ProcessStats>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        for row in rows {
            let Row { line, parsed } = row?;

            let outcome = match parsed {
                Ok(transaction) => {
                    let (kind, client, tx) =
                        (transaction.kind(), transaction.client(), transaction.tx());
                    let outcome = self.apply(transaction);
                    match &outcome {
                        Ok(()) => {
                            debug!("Row {}: applied {} {} for client {}", line, kind, tx, client)
                        }
                        Err(e @ RecordError::DuplicateTxId { .. }) => {
                            warn!("Row {}: {}, ignoring {}", line, e, kind)
                        }
                        Err(e) => debug!("Row {}: ignoring {} {}: {}", line, kind, tx, e),
                    }
                    outcome
                }
                Err(e) => {
                    warn!("Row {}: {}", line, e);
                    Err(e)
                }
            };

            self.stats.record(&outcome);
        }

        Ok(&self.stats)
    }

    /// Reads a transaction CSV lazily and processes it.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<&ProcessStats> {
        let rows = TransactionReader::new(reader)?;
        self.process(rows)
    }

    /// Applies a single transaction.
    ///
    /// The error says why the record was discarded; the engine state is then
    /// exactly as before the call, apart from a possibly new empty account.
    pub fn apply(&mut self, transaction: Transaction) -> std::result::Result<(), RecordError> {
        let client = transaction.client();
        let mut account = *self
            .accounts
            .entry(client)
            .or_insert_with(|| Account::new(client));
        account.ensure_unlocked()?;

        match transaction {
            Transaction::Deposit { tx, amount, .. } => {
                self.ensure_unused(tx)?;
                account.deposit(amount)?;
                self.remember(tx, HistoryEntry::deposit(client, amount))?;
            }
            Transaction::Withdrawal { tx, amount, .. } => {
                self.ensure_unused(tx)?;
                account.withdraw(amount)?;
                self.remember(tx, HistoryEntry::withdrawal(client, amount))?;
            }
            Transaction::Dispute { tx, .. } => {
                let entry = self.referenced(client, tx)?;
                self.disputes.check(tx, DisputeState::Normal, "dispute")?;
                if entry.kind == EntryKind::Deposit {
                    account.hold(entry.amount)?;
                }
                self.disputes.begin_dispute(tx)?;
            }
            Transaction::Resolve { tx, .. } => {
                // only an open dispute can be resolved, whatever the reference
                self.disputes.check(tx, DisputeState::Disputed, "resolve")?;
                let entry = self.referenced(client, tx)?;
                if entry.kind == EntryKind::Deposit {
                    account.release(entry.amount)?;
                }
                self.disputes.resolve(tx)?;
            }
            Transaction::Chargeback { tx, .. } => {
                self.disputes.check(tx, DisputeState::Disputed, "charge back")?;
                let entry = self.referenced(client, tx)?;
                match entry.kind {
                    EntryKind::Deposit => account.charge_back_deposit(entry.amount)?,
                    EntryKind::Withdrawal => account.charge_back_withdrawal(entry.amount)?,
                }
                self.disputes.chargeback(tx)?;
            }
        }

        self.accounts.insert(client, account);
        Ok(())
    }

    fn ensure_unused(&self, tx: TxId) -> std::result::Result<(), RecordError> {
        if self.history.contains(tx) {
            return Err(RecordError::DuplicateTxId { tx });
        }
        Ok(())
    }

    fn remember(&mut self, tx: TxId, entry: HistoryEntry) -> std::result::Result<(), RecordError> {
        self.history.record(tx, entry)?;
        self.disputes.track(tx);
        Ok(())
    }

    /// Looks up the deposit or withdrawal `tx`, which must belong to `client`.
    fn referenced(&self, client: ClientId, tx: TxId) -> std::result::Result<HistoryEntry, RecordError> {
        match self.history.lookup(tx) {
            Ok(entry) if entry.client == client => Ok(*entry),
            Ok(_) | Err(_) => Err(RecordError::UnknownReference { client, tx }),
        }
    }

    pub fn accounts(&self) -> &HashMap<ClientId, Account> {
        &self.accounts
    }

    pub fn account(&self, client: ClientId) -> Option<&Account> {
        self.accounts.get(&client)
    }

    /// Counters accumulated by [`LedgerEngine::process`].
    pub fn stats(&self) -> &ProcessStats {
        &self.stats
    }

    pub fn dispute_state(&self, tx: TxId) -> Option<DisputeState> {
        self.disputes.state(tx)
    }

    pub fn open_disputes(&self) -> usize {
        self.disputes.open_disputes()
    }

    /// Number of recorded deposits and withdrawals.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Sum of all account totals.
    pub fn ledger_total(&self) -> Option<Amount> {
        self.accounts
            .values()
            .try_fold(Amount::ZERO, |sum, account| sum.checked_add(account.total()))
    }

    /// Final account rows, sorted by client ID.
    pub fn summary(&self) -> Vec<AccountSummary> {
        report::summarize(self.accounts.values())
    }

    /// Writes the final account states as CSV.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        report::write_csv(&self.summary(), writer)
    }
}
