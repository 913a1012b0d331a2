//! Account-related types for the teller
//!
//! This module defines the Account record held by the store for each
//! registered user.

use super::credential::CredentialHash;
use super::ledger::LedgerEntry;
use rust_decimal::Decimal;

/// A registered user's account
///
/// Created only through successful registration and never deleted. The
/// identity fields (`id`, `username`) are immutable after creation; the
/// balance and ledger are mutated only by the transaction engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// National identification string (pure digits, at least 10 of them)
    pub id: String,

    /// Unique, case-sensitive, alphanumeric username
    ///
    /// Serves as the lookup key within the account store.
    pub username: String,

    /// Validated email address
    pub email: String,

    /// Salted one-way hash of the login secret
    pub credential: CredentialHash,

    /// Current balance
    ///
    /// Never negative after a successful operation. Starts at zero on
    /// registration.
    pub balance: Decimal,

    /// Append-only transaction ledger, in operation-success order
    pub ledger: Vec<LedgerEntry>,
}

impl Account {
    /// Create a freshly registered account with zero balance and empty ledger
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        credential: CredentialHash,
    ) -> Self {
        Account {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            credential,
            balance: Decimal::ZERO,
            ledger: Vec::new(),
        }
    }
}
