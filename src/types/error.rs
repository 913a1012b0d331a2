//! Error types for the teller
//!
//! This module defines all error types that can occur while registering
//! accounts, authenticating, and applying transactions. Errors are designed
//! to be descriptive and user-friendly for interactive output.
//!
//! # Error Categories
//!
//! - **Validation errors**: bad id/username/email or credential mismatch
//!   during registration. Recoverable; the caller re-prompts for the one
//!   offending field.
//! - **Lookup errors**: unknown username. Recoverable; the shell offers
//!   registration instead.
//! - **Transaction errors**: non-positive or unaffordable amounts. The
//!   operation simply does not apply and account state is unchanged.
//! - **I/O errors**: the backing file could not be read or written. The
//!   only category that can abort a save.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the teller
///
/// Each variant carries enough context to render a field-scoped message
/// back to the operator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TellerError {
    /// National ID failed validation
    ///
    /// An ID must consist entirely of digits and be at least 10 long.
    #[error("Invalid national ID '{id}': must be at least 10 digits")]
    InvalidId {
        /// The rejected ID value
        id: String,
    },

    /// Username failed validation
    ///
    /// Usernames must be non-empty and contain only letters and digits.
    #[error("Invalid username '{username}': only letters and digits are allowed")]
    InvalidUsername {
        /// The rejected username
        username: String,
    },

    /// Username is already registered
    ///
    /// Usernames are the unique key of the account store.
    #[error("Username '{username}' is already in use")]
    UsernameTaken {
        /// The duplicate username
        username: String,
    },

    /// Email address failed validation
    #[error("Invalid email address '{email}'")]
    InvalidEmail {
        /// The rejected email address
        email: String,
    },

    /// Credential was empty during registration
    #[error("A credential is required")]
    EmptyCredential,

    /// Credential and its confirmation did not match
    #[error("The credentials do not match")]
    CredentialMismatch,

    /// No account exists for the given username
    ///
    /// Recoverable; the interactive surface offers registration.
    #[error("No account exists for username '{username}'")]
    NotFound {
        /// The username that was looked up
        username: String,
    },

    /// Transaction amount was zero or negative
    ///
    /// Recoverable; the operation is rejected and nothing changes.
    #[error("Invalid amount {amount}: must be greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Withdrawal amount exceeds the current balance
    ///
    /// Recoverable; the withdrawal is rejected and the balance is
    /// unchanged.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Current account balance
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Arithmetic overflow would occur
    ///
    /// Recoverable; the transaction is rejected to maintain account
    /// integrity.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// I/O error while reading or writing the backing file
    ///
    /// Fatal for the save in progress; everything else continues.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to TellerError
impl From<std::io::Error> for TellerError {
    fn from(error: std::io::Error) -> Self {
        TellerError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl TellerError {
    /// Create an InvalidId error
    pub fn invalid_id(id: &str) -> Self {
        TellerError::InvalidId { id: id.to_string() }
    }

    /// Create an InvalidUsername error
    pub fn invalid_username(username: &str) -> Self {
        TellerError::InvalidUsername {
            username: username.to_string(),
        }
    }

    /// Create a UsernameTaken error
    pub fn username_taken(username: &str) -> Self {
        TellerError::UsernameTaken {
            username: username.to_string(),
        }
    }

    /// Create an InvalidEmail error
    pub fn invalid_email(email: &str) -> Self {
        TellerError::InvalidEmail {
            email: email.to_string(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(username: &str) -> Self {
        TellerError::NotFound {
            username: username.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        TellerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(balance: Decimal, requested: Decimal) -> Self {
        TellerError::InsufficientFunds { balance, requested }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        TellerError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Whether this error is a registration validation failure
    ///
    /// Validation failures are field-scoped: the caller re-prompts for the
    /// offending field only, never the whole form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TellerError::InvalidId { .. }
                | TellerError::InvalidUsername { .. }
                | TellerError::UsernameTaken { .. }
                | TellerError::InvalidEmail { .. }
                | TellerError::EmptyCredential
                | TellerError::CredentialMismatch
        )
    }
}
