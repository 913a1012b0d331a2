//! Authentication gate
//!
//! Verifies login attempts against the account store and enforces an
//! attempt-bounded lockout, without ever mutating the store.
//!
//! # Session state machine
//!
//! ```text
//! AwaitingUsername -> AwaitingCredential(attempts_remaining = 3)
//!                  -> Authenticated | LockedOut
//! ```
//!
//! An unknown username keeps the session awaiting a username and reports
//! `UnknownUsername` so the surrounding surface can offer registration.
//! Each wrong credential decrements the remaining attempts; reaching zero
//! locks the session out, a terminal state. Lockout is scoped to the
//! session only and is not persisted across runs.

use crate::core::store::AccountStore;

/// Wrong credentials tolerated before a session locks out
pub const MAX_CREDENTIAL_ATTEMPTS: u8 = 3;

/// Current position of a login session in the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No username submitted yet
    AwaitingUsername,

    /// Username accepted; waiting for the credential
    AwaitingCredential {
        /// Username being authenticated
        username: String,
        /// Wrong credentials still tolerated
        attempts_remaining: u8,
    },

    /// Login succeeded; the username is the session identity
    Authenticated {
        /// Authenticated username
        username: String,
    },

    /// Attempts exhausted; terminal for this session
    LockedOut {
        /// Username the attempts were made against
        username: String,
    },
}

/// Outcome of feeding one input into the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// The username is not registered; the caller may offer registration
    UnknownUsername,

    /// Username accepted; a credential is required next
    CredentialRequired {
        /// Wrong credentials still tolerated
        attempts_remaining: u8,
    },

    /// Credential rejected; more attempts remain
    WrongCredential {
        /// Wrong credentials still tolerated
        attempts_remaining: u8,
    },

    /// Login succeeded
    Authenticated {
        /// Authenticated username, carried forward as session identity
        username: String,
    },

    /// Attempts exhausted; the session is over
    LockedOut,
}

/// One interactive login session
///
/// Drives the state machine above. Inputs submitted out of order leave the
/// state unchanged and report the step matching the current state.
#[derive(Debug)]
pub struct LoginSession {
    state: SessionState,
}

impl LoginSession {
    /// Start a session awaiting a username
    pub fn new() -> Self {
        LoginSession {
            state: SessionState::AwaitingUsername,
        }
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Submit a username
    ///
    /// A registered username moves the session to awaiting a credential
    /// with the full attempt budget; an unknown one leaves the session
    /// awaiting a username.
    pub fn submit_username(&mut self, store: &AccountStore, username: &str) -> LoginStep {
        match &self.state {
            SessionState::AwaitingUsername => {
                if store.contains(username) {
                    self.state = SessionState::AwaitingCredential {
                        username: username.to_string(),
                        attempts_remaining: MAX_CREDENTIAL_ATTEMPTS,
                    };
                    LoginStep::CredentialRequired {
                        attempts_remaining: MAX_CREDENTIAL_ATTEMPTS,
                    }
                } else {
                    LoginStep::UnknownUsername
                }
            }
            SessionState::AwaitingCredential {
                attempts_remaining, ..
            } => LoginStep::CredentialRequired {
                attempts_remaining: *attempts_remaining,
            },
            SessionState::Authenticated { username } => LoginStep::Authenticated {
                username: username.clone(),
            },
            SessionState::LockedOut { .. } => LoginStep::LockedOut,
        }
    }

    /// Submit a credential for the pending username
    ///
    /// A correct credential authenticates the session; a wrong one spends
    /// an attempt, and spending the last one locks the session out.
    pub fn submit_credential(&mut self, store: &AccountStore, secret: &str) -> LoginStep {
        match &self.state {
            SessionState::AwaitingCredential {
                username,
                attempts_remaining,
            } => {
                let verified = store
                    .get(username)
                    .map(|account| account.credential.verify(secret))
                    .unwrap_or(false);

                if verified {
                    let username = username.clone();
                    self.state = SessionState::Authenticated {
                        username: username.clone(),
                    };
                    LoginStep::Authenticated { username }
                } else {
                    let username = username.clone();
                    let attempts_remaining = attempts_remaining - 1;
                    if attempts_remaining == 0 {
                        self.state = SessionState::LockedOut { username };
                        LoginStep::LockedOut
                    } else {
                        self.state = SessionState::AwaitingCredential {
                            username,
                            attempts_remaining,
                        };
                        LoginStep::WrongCredential { attempts_remaining }
                    }
                }
            }
            SessionState::AwaitingUsername => LoginStep::UnknownUsername,
            SessionState::Authenticated { username } => LoginStep::Authenticated {
                username: username.clone(),
            },
            SessionState::LockedOut { .. } => LoginStep::LockedOut,
        }
    }
}

impl Default for LoginSession {
    fn default() -> Self {
        Self::new()
    }
}
