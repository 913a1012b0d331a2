//! Salted credential hashing
//!
//! Accounts never store the raw secret. A `CredentialHash` holds a random
//! per-account salt and the SHA-256 digest of salt plus secret; login
//! verification recomputes the digest from the attempted secret.

use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of random salt bytes generated per credential
const SALT_LEN: usize = 16;

/// A salted one-way hash of an account credential
///
/// Serialized on disk as `<salt-hex>$<digest-hex>`. Two hashes of the same
/// secret differ because each carries its own random salt, so equality of
/// `CredentialHash` values is only meaningful for round-trip testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHash {
    /// Hex-encoded random salt
    salt: String,

    /// Hex-encoded SHA-256 digest of salt followed by the secret
    digest: String,
}

impl CredentialHash {
    /// Hash a raw secret with a freshly generated random salt
    pub fn new(secret: &str) -> Self {
        let mut salt_bytes = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = hex::encode(salt_bytes);
        let digest = Self::digest_for(&salt, secret);
        CredentialHash { salt, digest }
    }

    /// Check whether an attempted secret matches this hash
    pub fn verify(&self, secret: &str) -> bool {
        Self::digest_for(&self.salt, secret) == self.digest
    }

    /// Parse the stored `<salt-hex>$<digest-hex>` representation
    ///
    /// Returns `None` when the separator is missing or either half is not
    /// valid hex, so a corrupted credential field is detected at load time.
    pub fn from_stored(stored: &str) -> Option<Self> {
        let (salt, digest) = stored.split_once('$')?;
        if salt.is_empty() || digest.is_empty() {
            return None;
        }
        if hex::decode(salt).is_err() || hex::decode(digest).is_err() {
            return None;
        }
        Some(CredentialHash {
            salt: salt.to_string(),
            digest: digest.to_string(),
        })
    }

    fn digest_for(salt: &str, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}${}", self.salt, self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_secret_verifies() {
        let hash = CredentialHash::new("secret");
        assert!(hash.verify("secret"));
    }

    #[test]
    fn test_wrong_secret_does_not_verify() {
        let hash = CredentialHash::new("secret");
        assert!(!hash.verify("Secret"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let first = CredentialHash::new("secret");
        let second = CredentialHash::new("secret");
        assert_ne!(first, second);
        assert!(first.verify("secret"));
        assert!(second.verify("secret"));
    }

    #[test]
    fn test_stored_representation_round_trips() {
        let hash = CredentialHash::new("secret");
        let stored = hash.to_string();

        let parsed = CredentialHash::from_stored(&stored).unwrap();
        assert_eq!(parsed, hash);
        assert!(parsed.verify("secret"));
    }

    #[test]
    fn test_from_stored_rejects_malformed_input() {
        assert!(CredentialHash::from_stored("no-separator").is_none());
        assert!(CredentialHash::from_stored("$abcdef").is_none());
        assert!(CredentialHash::from_stored("abcdef$").is_none());
        assert!(CredentialHash::from_stored("not-hex$abcdef").is_none());
    }
}
