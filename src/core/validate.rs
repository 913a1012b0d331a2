//! Registration field validation
//!
//! Each validator checks one field independently so that a failure can be
//! re-prompted on its own, never resetting the whole form.

use crate::types::TellerError;

/// Top-level domain literal accepted in email addresses
const EMAIL_TLD: &str = ".com";

/// Validate a national ID: pure digits, at least 10 of them
pub fn validate_id(id: &str) -> Result<(), TellerError> {
    if id.len() >= 10 && id.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(TellerError::invalid_id(id))
    }
}

/// Validate a username: non-empty, letters and digits only
///
/// Uniqueness against the store is checked separately by the store itself.
pub fn validate_username(username: &str) -> Result<(), TellerError> {
    if !username.is_empty() && username.chars().all(char::is_alphanumeric) {
        Ok(())
    } else {
        Err(TellerError::invalid_username(username))
    }
}

/// Validate an email address against the simplified single-`@` pattern
///
/// The local part must be non-empty alphanumeric plus dots; the domain must
/// end in the fixed `.com` literal with a non-empty alphanumeric-plus-dots
/// remainder.
pub fn validate_email(email: &str) -> Result<(), TellerError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(TellerError::invalid_email(email));
    };
    if email.matches('@').count() != 1 {
        return Err(TellerError::invalid_email(email));
    }
    if !is_dotted_alphanumeric(local) {
        return Err(TellerError::invalid_email(email));
    }
    let Some(domain_base) = domain.strip_suffix(EMAIL_TLD) else {
        return Err(TellerError::invalid_email(email));
    };
    if !is_dotted_alphanumeric(domain_base) {
        return Err(TellerError::invalid_email(email));
    }
    Ok(())
}

/// Validate a credential and its confirmation
///
/// The secret must be non-empty and entered identically twice.
pub fn validate_credential(secret: &str, confirmation: &str) -> Result<(), TellerError> {
    if secret.is_empty() {
        return Err(TellerError::EmptyCredential);
    }
    if secret != confirmation {
        return Err(TellerError::CredentialMismatch);
    }
    Ok(())
}

/// Alphanumeric plus dots, with at least one alphanumeric character
fn is_dotted_alphanumeric(part: &str) -> bool {
    let stripped: String = part.chars().filter(|c| *c != '.').collect();
    !stripped.is_empty() && stripped.chars().all(char::is_alphanumeric)
}
