//! Core business logic module
//!
//! This module contains the components with real invariants:
//! - `store` - Canonical account collection, registration, persistence
//! - `engine` - Balance-affecting operations against single accounts
//! - `auth` - Login session state machine with bounded-retry lockout
//! - `validate` - Field-scoped registration validation

pub mod auth;
pub mod engine;
pub mod store;
pub mod validate;

pub use auth::{LoginSession, LoginStep, SessionState, MAX_CREDENTIAL_ATTEMPTS};
pub use engine::TransactionEngine;
pub use store::{AccountStore, Registration};
