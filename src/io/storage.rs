//! Backing-file storage
//!
//! Owns the path to the flat account file and performs whole-file reads
//! and writes around the codec. File handles are scoped to each call;
//! nothing is held open between operations.

use crate::io::codec;
use crate::types::{Account, TellerError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Handle to the flat file that persists the account collection
///
/// The path is injected at construction, so the caller decides where the
/// state lives; there is no ambient default inside the library.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Create a storage handle for the given backing file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the backing file
    ///
    /// A missing file is not an error: an empty file is created so that
    /// subsequent runs see a consistent, existing file, and an empty
    /// collection is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if the
    /// empty file cannot be created.
    pub fn load(&self) -> Result<BTreeMap<String, Account>, TellerError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(codec::decode(&content)),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "backing file missing, creating empty file");
                fs::write(&self.path, "")?;
                Ok(BTreeMap::new())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Encode and fully rewrite the backing file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written; the caller surfaces
    /// it to the operator and the save is abandoned.
    pub fn save(&self, accounts: &BTreeMap<String, Account>) -> Result<(), TellerError> {
        fs::write(&self.path, codec::encode(accounts))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CredentialHash;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_creates_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        let storage = Storage::new(&path);

        let accounts = storage.load().unwrap();
        assert!(accounts.is_empty());
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("accounts.txt"));

        let mut accounts = BTreeMap::new();
        accounts.insert(
            "alice1".to_string(),
            Account::new(
                "1234567890",
                "alice1",
                "alice@bank.com",
                CredentialHash::new("secret"),
            ),
        );
        storage.save(&accounts).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, accounts);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("accounts.txt"));

        let mut accounts = BTreeMap::new();
        accounts.insert(
            "alice1".to_string(),
            Account::new(
                "1234567890",
                "alice1",
                "alice@bank.com",
                CredentialHash::new("secret"),
            ),
        );
        storage.save(&accounts).unwrap();

        accounts.remove("alice1");
        storage.save(&accounts).unwrap();

        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let storage = Storage::new("/nonexistent-dir/accounts.txt");
        let result = storage.save(&BTreeMap::new());
        assert!(matches!(result, Err(TellerError::Io { .. })));
    }
}
