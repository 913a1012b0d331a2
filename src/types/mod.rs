//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account record and related functionality
//! - `credential`: Salted credential hashing
//! - `error`: Error types for the teller
//! - `ledger`: Transaction ledger entries

pub mod account;
pub mod credential;
pub mod error;
pub mod ledger;

pub use account::Account;
pub use credential::CredentialHash;
pub use error::TellerError;
pub use ledger::LedgerEntry;
