//! Transaction records: the raw CSV row and the validated ledger event.

use crate::amount::Amount;
use crate::error::RecordError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub type ClientId = u16;
pub type TxId = u32;

/// Raw transaction row as read from CSV.
///
/// Only the numeric identifiers are typed here; the kind and the amount are
/// validated by [`TransactionRecord::parse`] so that every structural problem
/// ends up as a [`RecordError::MalformedRecord`].
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    /// deposit, withdrawal, dispute, resolve or chargeback
    #[serde(rename = "type")]
    pub tx_type: String,

    pub client: ClientId,

    pub tx: TxId,

    /// Present for deposit/withdrawal only
    pub amount: Option<String>,
}

impl TransactionRecord {
    /// Validates the raw row into a [`Transaction`].
    pub fn parse(&self) -> Result<Transaction, RecordError> {
        let kind = TxKind::from_str(&self.tx_type)?;
        let (client, tx) = (self.client, self.tx);

        let transaction = match kind {
            TxKind::Deposit => Transaction::Deposit {
                client,
                tx,
                amount: self.parse_amount(kind)?,
            },
            TxKind::Withdrawal => Transaction::Withdrawal {
                client,
                tx,
                amount: self.parse_amount(kind)?,
            },
            TxKind::Dispute | TxKind::Resolve | TxKind::Chargeback => {
                if self.amount_str().is_some() {
                    return Err(RecordError::malformed(format!(
                        "{} of transaction {} must not carry an amount",
                        kind, tx
                    )));
                }
                match kind {
                    TxKind::Dispute => Transaction::Dispute { client, tx },
                    TxKind::Resolve => Transaction::Resolve { client, tx },
                    _ => Transaction::Chargeback { client, tx },
                }
            }
        };

        Ok(transaction)
    }

    fn amount_str(&self) -> Option<&str> {
        self.amount
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn parse_amount(&self, kind: TxKind) -> Result<Amount, RecordError> {
        let raw = self.amount_str().ok_or_else(|| {
            RecordError::malformed(format!("{} {} is missing an amount", kind, self.tx))
        })?;

        let amount = Amount::from_str(raw)
            .map_err(|e| RecordError::malformed(format!("invalid amount '{}': {}", raw, e)))?;

        if amount.is_negative() {
            return Err(RecordError::malformed(format!(
                "negative amount '{}' for {} {}",
                raw, kind, self.tx
            )));
        }

        Ok(amount)
    }
}

/// The five record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    Deposit,
    Withdrawal,
    Dispute,
    Resolve,
    Chargeback,
}

impl FromStr for TxKind {
    type Err = RecordError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(TxKind::Deposit),
            "withdrawal" => Ok(TxKind::Withdrawal),
            "dispute" => Ok(TxKind::Dispute),
            "resolve" => Ok(TxKind::Resolve),
            "chargeback" => Ok(TxKind::Chargeback),
            other => Err(RecordError::malformed(format!(
                "unknown transaction type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxKind::Deposit => "deposit",
            TxKind::Withdrawal => "withdrawal",
            TxKind::Dispute => "dispute",
            TxKind::Resolve => "resolve",
            TxKind::Chargeback => "chargeback",
        };
        f.write_str(name)
    }
}

/// One validated ledger event.
///
/// Deposits and withdrawals carry their own amount; disputes, resolves and
/// chargebacks only reference an earlier deposit or withdrawal by `tx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Credit funds to the client's account.
    Deposit {
        client: ClientId,
        tx: TxId,
        amount: Amount,
    },

    /// Debit funds, if enough are available.
    Withdrawal {
        client: ClientId,
        tx: TxId,
        amount: Amount,
    },

    /// Claim against an earlier deposit or withdrawal.
    Dispute { client: ClientId, tx: TxId },

    /// Close a dispute in the client's favour.
    Resolve { client: ClientId, tx: TxId },

    /// Close a dispute against the client and lock the account.
    Chargeback { client: ClientId, tx: TxId },
}

impl Transaction {
    pub fn client(&self) -> ClientId {
        match *self {
            Transaction::Deposit { client, .. }
            | Transaction::Withdrawal { client, .. }
            | Transaction::Dispute { client, .. }
            | Transaction::Resolve { client, .. }
            | Transaction::Chargeback { client, .. } => client,
        }
    }

    pub fn tx(&self) -> TxId {
        match *self {
            Transaction::Deposit { tx, .. }
            | Transaction::Withdrawal { tx, .. }
            | Transaction::Dispute { tx, .. }
            | Transaction::Resolve { tx, .. }
            | Transaction::Chargeback { tx, .. } => tx,
        }
    }

    pub fn kind(&self) -> TxKind {
        match self {
            Transaction::Deposit { .. } => TxKind::Deposit,
            Transaction::Withdrawal { .. } => TxKind::Withdrawal,
            Transaction::Dispute { .. } => TxKind::Dispute,
            Transaction::Resolve { .. } => TxKind::Resolve,
            Transaction::Chargeback { .. } => TxKind::Chargeback,
        }
    }
}
