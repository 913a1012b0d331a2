//! Account store
//!
//! This module provides the `AccountStore`, which owns the canonical
//! in-memory set of accounts and is the only component permitted to add
//! new accounts or persist the set.
//!
//! The store is responsible for:
//! - Hydrating the collection from the backing file at startup
//! - Validating registration fields and enforcing username uniqueness
//! - Committing confirmed registrations
//! - Rewriting the backing file after every state-changing operation

use crate::core::validate;
use crate::io::Storage;
use crate::types::{Account, CredentialHash, TellerError};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// A validated, not-yet-committed registration
///
/// Produced by [`AccountStore::prepare_registration`] once every field
/// validation has passed. Nothing is persisted until the operator confirms
/// and the registration is handed to [`AccountStore::commit_registration`].
#[derive(Debug, Clone)]
pub struct Registration {
    id: String,
    username: String,
    email: String,
    credential: CredentialHash,
}

impl Registration {
    /// National ID of the pending account
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Username of the pending account
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Email address of the pending account
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Owns all registered accounts and their persistence
///
/// The backing file path is injected at construction and the store is
/// passed by reference to every operation; there is no process-wide
/// ambient state.
#[derive(Debug)]
pub struct AccountStore {
    /// Username-keyed account collection, in key order for deterministic output
    accounts: BTreeMap<String, Account>,
    /// Backing-file handle
    storage: Storage,
}

impl AccountStore {
    /// Open the store, hydrating it from the backing file
    ///
    /// A missing file yields an empty store and creates the file as a side
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be read, or
    /// if the empty file cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TellerError> {
        let storage = Storage::new(path.as_ref());
        let accounts = storage.load()?;
        info!(
            count = accounts.len(),
            path = %storage.path().display(),
            "account store loaded"
        );
        Ok(AccountStore { accounts, storage })
    }

    /// Serialize the full collection and rewrite the backing file
    ///
    /// Called synchronously after every state-changing operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written; the save is
    /// abandoned and the error surfaces to the operator.
    pub fn save(&self) -> Result<(), TellerError> {
        self.storage.save(&self.accounts)
    }

    /// Whether an account exists for the given username
    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up an account by username
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the username is absent.
    pub fn get(&self, username: &str) -> Result<&Account, TellerError> {
        self.accounts
            .get(username)
            .ok_or_else(|| TellerError::not_found(username))
    }

    /// Look up an account mutably by username
    ///
    /// Restricted to the crate so that only the transaction engine can
    /// mutate balances and ledgers.
    pub(crate) fn get_mut(&mut self, username: &str) -> Result<&mut Account, TellerError> {
        self.accounts
            .get_mut(username)
            .ok_or_else(|| TellerError::not_found(username))
    }

    /// Validate registration input and hash the credential
    ///
    /// Runs every field validation: id (pure digits, length >= 10),
    /// username (alphanumeric, not already present), email (simplified
    /// single-`@` pattern), and the credential confirmation. The collection
    /// is not touched; the returned [`Registration`] commits nothing until
    /// explicitly passed to [`commit_registration`](Self::commit_registration).
    ///
    /// # Errors
    ///
    /// Returns the distinct validation error for the first offending field
    /// so the caller can re-prompt for that field only.
    pub fn prepare_registration(
        &self,
        id: &str,
        username: &str,
        email: &str,
        credential: &str,
        confirmation: &str,
    ) -> Result<Registration, TellerError> {
        validate::validate_id(id)?;
        validate::validate_username(username)?;
        if self.contains(username) {
            return Err(TellerError::username_taken(username));
        }
        validate::validate_email(email)?;
        validate::validate_credential(credential, confirmation)?;

        Ok(Registration {
            id: id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            credential: CredentialHash::new(credential),
        })
    }

    /// Commit a confirmed registration
    ///
    /// Creates the account with zero balance and empty ledger, adds it to
    /// the collection, and saves.
    ///
    /// # Errors
    ///
    /// Returns `UsernameTaken` if the username was registered between
    /// preparation and commit, or an I/O error if the save fails.
    pub fn commit_registration(
        &mut self,
        registration: Registration,
    ) -> Result<&Account, TellerError> {
        if self.contains(&registration.username) {
            return Err(TellerError::username_taken(&registration.username));
        }

        let username = registration.username.clone();
        let account = Account::new(
            registration.id,
            registration.username,
            registration.email,
            registration.credential,
        );
        self.accounts.insert(username.clone(), account);
        self.save()?;

        info!(username = %username, "account registered");
        Ok(&self.accounts[&username])
    }
}
