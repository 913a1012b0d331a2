//! Ledger entry types
//!
//! Every successful balance-affecting operation appends one entry to the
//! owning account's ledger. Entries are ordered by insertion and are never
//! reordered or removed.

use chrono::{Local, NaiveDateTime, Timelike};

/// A single entry in an account's transaction ledger
///
/// Pairs the moment an operation succeeded with a human-readable
/// description of what happened (e.g. `Deposit of 100`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// When the operation succeeded
    ///
    /// Stored at second precision to match the on-disk timestamp format.
    pub timestamp: NaiveDateTime,

    /// Human-readable description of the operation
    pub description: String,
}

impl LedgerEntry {
    /// Create a ledger entry with an explicit timestamp
    pub fn new(timestamp: NaiveDateTime, description: impl Into<String>) -> Self {
        LedgerEntry {
            timestamp,
            description: description.into(),
        }
    }

    /// Create a ledger entry stamped with the current local time
    ///
    /// Sub-second precision is truncated so that an entry round-trips
    /// unchanged through the backing file format.
    pub fn now(description: impl Into<String>) -> Self {
        let timestamp = Local::now().naive_local();
        LedgerEntry {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            description: description.into(),
        }
    }
}
