//! Flat-file codec for account records
//!
//! This module centralizes the on-disk text format, providing a lossless
//! round-trip between the in-memory account collection and the backing
//! file's contents. All functions are pure (no I/O) for easy testing.
//!
//! # Format
//!
//! Records are separated by a line containing exactly `---`. The first
//! line of a record holds five comma-separated fields in fixed order:
//!
//! ```text
//! <id>,<username>,<email>,<credential>,<balance>
//! <timestamp>:<description>
//! <timestamp>:<description>
//! ---
//! ```
//!
//! Timestamps use the fixed `YYYY-MM-DD HH:MM:SS` format. Every line after
//! the header up to the next separator encodes one ledger entry.
//!
//! # Escaping
//!
//! Field values are backslash-escaped on encode so that reserved characters
//! cannot corrupt the format: `\\` for a backslash, `\,` for a comma, `\:`
//! for a colon, and `\n` for a newline. Values free of reserved characters
//! are stored verbatim.
//!
//! # Malformed input
//!
//! Decoding never aborts. A header line with the wrong field count, an
//! unparseable balance, or a corrupt credential skips the whole record with
//! a warning; a ledger line with a bad timestamp or missing colon skips
//! that line with a warning.

use crate::types::{Account, CredentialHash, LedgerEntry};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

/// Line separating one account record from the next
pub const RECORD_SEPARATOR: &str = "---";

/// Wire format for ledger timestamps (24-hour clock, zero-padded)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Byte length of a formatted timestamp
const TIMESTAMP_LEN: usize = 19;

/// Number of comma-separated fields in a record header
const HEADER_FIELDS: usize = 5;

/// Escape reserved characters in a field value
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            ':' => escaped.push_str("\\:"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Undo [`escape`]
///
/// Unknown escape sequences keep the escaped character; a trailing lone
/// backslash is kept as-is.
pub fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => unescaped.push('\n'),
                Some(other) => unescaped.push(other),
                None => unescaped.push('\\'),
            }
        } else {
            unescaped.push(c);
        }
    }
    unescaped
}

/// Split a line on unescaped delimiters, unescaping each field
fn split_escaped(input: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => current.push('\n'),
                Some(other) => current.push(other),
                None => current.push('\\'),
            }
        } else if c == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

/// Parse a record header line into an account with an empty ledger
fn decode_header(line: &str) -> Option<Account> {
    let fields = split_escaped(line, ',');
    let [id, username, email, credential, balance]: [String; HEADER_FIELDS] =
        fields.try_into().ok()?;

    let balance = Decimal::from_str(balance.trim()).ok()?;
    let credential = CredentialHash::from_stored(&credential)?;

    Some(Account {
        id,
        username,
        email,
        credential,
        balance,
        ledger: Vec::new(),
    })
}

/// Parse one `timestamp:description` ledger line
///
/// The timestamp occupies a fixed 19 bytes, so the colons inside it are
/// unambiguous; the separating colon is the one immediately after it.
fn decode_ledger_line(line: &str) -> Option<LedgerEntry> {
    let (timestamp, rest) = line.split_at_checked(TIMESTAMP_LEN)?;
    let description = rest.strip_prefix(':')?;
    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
    Some(LedgerEntry::new(timestamp, unescape(description)))
}

/// Decode the backing file contents into a username-keyed account map
///
/// Malformed records and ledger lines are skipped with a warning; decoding
/// always produces whatever valid state the content holds.
pub fn decode(content: &str) -> BTreeMap<String, Account> {
    let mut accounts: BTreeMap<String, Account> = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line == RECORD_SEPARATOR {
            current = None;
            continue;
        }
        if line.is_empty() {
            continue;
        }

        match &current {
            None => match decode_header(line) {
                Some(account) => {
                    let username = account.username.clone();
                    accounts.insert(username.clone(), account);
                    current = Some(username);
                }
                None => warn!(line, "skipping malformed account record"),
            },
            Some(username) => match decode_ledger_line(line) {
                Some(entry) => {
                    if let Some(account) = accounts.get_mut(username) {
                        account.ledger.push(entry);
                    }
                }
                None => warn!(line, "skipping malformed ledger entry"),
            },
        }
    }

    accounts
}

/// Encode the account map into the backing file format
///
/// Accounts are emitted in username order (the map's key order) so output
/// is deterministic; ledger entries keep their stored order.
pub fn encode(accounts: &BTreeMap<String, Account>) -> String {
    let mut content = String::new();
    for account in accounts.values() {
        content.push_str(&format!(
            "{},{},{},{},{}\n",
            escape(&account.id),
            escape(&account.username),
            escape(&account.email),
            escape(&account.credential.to_string()),
            account.balance,
        ));
        for entry in &account.ledger {
            content.push_str(&format!(
                "{}:{}\n",
                entry.timestamp.format(TIMESTAMP_FORMAT),
                escape(&entry.description),
            ));
        }
        content.push_str(RECORD_SEPARATOR);
        content.push('\n');
    }
    content
}
