//! Client account model and balance transitions.
//!
//! `total` is never stored; it is always `available + held`.

use crate::amount::Amount;
use crate::error::RecordError;
use crate::transaction::ClientId;

/// A client's account state.
///
/// # Invariants
///
/// - `available + held` always fits in an [`Amount`], so [`Account::total`]
///   cannot overflow; the fields are private and only the balance
///   operations below change them
/// - Once `locked == true`, every operation is rejected with
///   [`RecordError::AccountLocked`] and the balances never change again
///
/// # Negative Available Balance
///
/// `available` may become negative when a deposit is disputed after some of
/// it was already withdrawn: the full deposit amount moves to `held`.
/// Withdrawals alone can never take it below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    client: ClientId,

    /// Funds available for withdrawal.
    available: Amount,

    /// Funds frozen by open disputes.
    held: Amount,

    /// Frozen by a chargeback.
    locked: bool,
}

impl Account {
    /// Creates an empty, unlocked account.
    pub fn new(client: ClientId) -> Self {
        Account {
            client,
            available: Amount::ZERO,
            held: Amount::ZERO,
            locked: false,
        }
    }

    pub fn client(&self) -> ClientId {
        self.client
    }

    pub fn available(&self) -> Amount {
        self.available
    }

    pub fn held(&self) -> Amount {
        self.held
    }

    pub fn total(&self) -> Amount {
        self.available.saturating_add(self.held)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn ensure_unlocked(&self) -> Result<(), RecordError> {
        if self.locked {
            return Err(RecordError::AccountLocked {
                client: self.client,
            });
        }
        Ok(())
    }

    /// Credits `available`.
    pub fn deposit(&mut self, amount: Amount) -> Result<(), RecordError> {
        self.ensure_unlocked()?;
        let available = self.add(self.available, amount)?;
        self.commit(available, self.held)
    }

    /// Debits `available`; fails with [`RecordError::InsufficientFunds`]
    /// when `available < amount`.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), RecordError> {
        self.ensure_unlocked()?;
        if self.available < amount {
            return Err(RecordError::InsufficientFunds {
                client: self.client,
                available: self.available,
                requested: amount,
            });
        }
        let available = self.sub(self.available, amount)?;
        self.commit(available, self.held)
    }

    /// Moves `amount` from `available` to `held` for a disputed deposit.
    pub fn hold(&mut self, amount: Amount) -> Result<(), RecordError> {
        self.ensure_unlocked()?;
        let available = self.sub(self.available, amount)?;
        let held = self.add(self.held, amount)?;
        self.commit(available, held)
    }

    /// Moves `amount` from `held` back to `available` when a dispute on a
    /// deposit is resolved.
    pub fn release(&mut self, amount: Amount) -> Result<(), RecordError> {
        self.ensure_unlocked()?;
        let held = self.sub(self.held, amount)?;
        let available = self.add(self.available, amount)?;
        self.commit(available, held)
    }

    /// Charges back a disputed deposit: the held funds leave the account,
    /// which is then locked.
    pub fn charge_back_deposit(&mut self, amount: Amount) -> Result<(), RecordError> {
        self.ensure_unlocked()?;
        let held = self.sub(self.held, amount)?;
        self.commit(self.available, held)?;
        self.locked = true;
        Ok(())
    }

    /// Charges back a disputed withdrawal: the withdrawn funds return to
    /// `available`, and the account is locked.
    pub fn charge_back_withdrawal(&mut self, amount: Amount) -> Result<(), RecordError> {
        self.ensure_unlocked()?;
        let available = self.add(self.available, amount)?;
        self.commit(available, self.held)?;
        self.locked = true;
        Ok(())
    }

    fn add(&self, lhs: Amount, rhs: Amount) -> Result<Amount, RecordError> {
        lhs.checked_add(rhs).ok_or(RecordError::Overflow {
            client: self.client,
        })
    }

    fn sub(&self, lhs: Amount, rhs: Amount) -> Result<Amount, RecordError> {
        lhs.checked_sub(rhs).ok_or(RecordError::Overflow {
            client: self.client,
        })
    }

    /// Stores the new balances if their sum is representable.
    fn commit(&mut self, available: Amount, held: Amount) -> Result<(), RecordError> {
        self.add(available, held)?;
        self.available = available;
        self.held = held;
        Ok(())
    }
}
