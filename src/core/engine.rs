//! Transaction engine
//!
//! Applies balance-affecting operations against exactly one account at a
//! time, never crossing accounts. Every successful mutation appends a
//! ledger entry and triggers an immediate full save through the store;
//! rejected operations mutate nothing and append nothing.

use crate::core::store::AccountStore;
use crate::types::{LedgerEntry, TellerError};
use rust_decimal::Decimal;
use tracing::debug;

/// Applies deposits, withdrawals, and read-only inquiries to the store
///
/// Borrows the store mutably for the lifetime of an authenticated session;
/// operations are keyed by the session's username.
pub struct TransactionEngine<'a> {
    store: &'a mut AccountStore,
}

impl<'a> TransactionEngine<'a> {
    /// Create an engine operating on the given store
    pub fn new(store: &'a mut AccountStore) -> Self {
        TransactionEngine { store }
    }

    /// Deposit funds into the named account
    ///
    /// Increments the balance, appends a deposit ledger entry stamped with
    /// the current time, and saves.
    ///
    /// # Arguments
    ///
    /// * `username` - The account to credit
    /// * `amount` - The amount to deposit (must be positive)
    ///
    /// # Returns
    ///
    /// The balance after the deposit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` when the amount is zero or negative,
    /// `NotFound` for an unknown username, or an I/O error if the save
    /// fails.
    pub fn deposit(&mut self, username: &str, amount: Decimal) -> Result<Decimal, TellerError> {
        if amount <= Decimal::ZERO {
            return Err(TellerError::invalid_amount(amount));
        }

        let account = self.store.get_mut(username)?;
        let new_balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| TellerError::arithmetic_overflow("deposit"))?;

        account.balance = new_balance;
        account
            .ledger
            .push(LedgerEntry::now(format!("Deposit of {}", amount)));
        self.store.save()?;

        debug!(username, %amount, %new_balance, "deposit applied");
        Ok(new_balance)
    }

    /// Withdraw funds from the named account
    ///
    /// Decrements the balance, appends a withdrawal ledger entry stamped
    /// with the current time, and saves. The balance is never driven
    /// negative: a request exceeding the current balance is rejected and
    /// leaves the account unchanged.
    ///
    /// # Arguments
    ///
    /// * `username` - The account to debit
    /// * `amount` - The amount to withdraw (must be positive)
    ///
    /// # Returns
    ///
    /// The balance after the withdrawal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` when the amount is zero or negative,
    /// `InsufficientFunds` when the amount exceeds the current balance,
    /// `NotFound` for an unknown username, or an I/O error if the save
    /// fails.
    pub fn withdraw(&mut self, username: &str, amount: Decimal) -> Result<Decimal, TellerError> {
        if amount <= Decimal::ZERO {
            return Err(TellerError::invalid_amount(amount));
        }

        let account = self.store.get_mut(username)?;
        if amount > account.balance {
            return Err(TellerError::insufficient_funds(account.balance, amount));
        }

        let new_balance = account.balance - amount;
        account.balance = new_balance;
        account
            .ledger
            .push(LedgerEntry::now(format!("Withdrawal of {}", amount)));
        self.store.save()?;

        debug!(username, %amount, %new_balance, "withdrawal applied");
        Ok(new_balance)
    }

    /// Current balance of the named account
    ///
    /// Pure read; no side effect.
    pub fn balance(&self, username: &str) -> Result<Decimal, TellerError> {
        Ok(self.store.get(username)?.balance)
    }

    /// Transaction history of the named account, in operation order
    ///
    /// Pure read. Returns `None` for an empty ledger so callers can render
    /// "no transactions" distinctly from a list.
    pub fn history(&self, username: &str) -> Result<Option<&[LedgerEntry]>, TellerError> {
        let account = self.store.get(username)?;
        if account.ledger.is_empty() {
            Ok(None)
        } else {
            Ok(Some(account.ledger.as_slice()))
        }
    }
}
