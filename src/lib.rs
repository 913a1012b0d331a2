//! Teller Library
//! # Overview
//!
//! This library provides a single-user, file-backed banking simulator:
//! account registration, authentication, and balance-affecting operations
//! persisted to a flat text file between runs.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, LedgerEntry, CredentialHash, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::store`] - Canonical account collection and persistence
//!   - [`core::engine`] - Deposits, withdrawals, balance and history reads
//!   - [`core::auth`] - Login session state machine with bounded lockout
//! - [`io`] - Flat-file codec and scoped backing-file storage
//! - [`shell`] - Interactive menu loop over the core operations
//!
//! # Operations
//!
//! The core supports five account operations:
//!
//! - **Register**: Validate fields, confirm, create a zero-balance account
//! - **Deposit**: Credit funds and append a ledger entry
//! - **Withdraw**: Debit funds (requires sufficient balance)
//! - **Balance**: Read the current balance
//! - **History**: Read the ordered transaction ledger
//!
//! # Invariants
//!
//! - Usernames are the unique key of the store
//! - Balances never go negative through a successful operation
//! - Ledgers are append-only, in operation-success order
//! - Every mutation is followed by a full rewrite of the backing file

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod shell;
pub mod types;

pub use crate::core::{
    AccountStore, LoginSession, LoginStep, Registration, SessionState, TransactionEngine,
    MAX_CREDENTIAL_ATTEMPTS,
};
pub use crate::io::Storage;
pub use crate::shell::Shell;
pub use crate::types::{Account, CredentialHash, LedgerEntry, TellerError};
