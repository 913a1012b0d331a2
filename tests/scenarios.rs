//! Integration tests over the public library API
//!
//! These tests exercise complete register/transact/reload scenarios against
//! real backing files in temporary directories, validating the properties
//! the core guarantees: round-trip persistence, balance non-negativity,
//! append-only ledgers, username uniqueness, and tolerant decoding of
//! malformed records.

use rust_decimal::Decimal;
use std::fs;
use teller::{AccountStore, CredentialHash, TellerError, TransactionEngine};
use tempfile::tempdir;

fn dec(value: i64) -> Decimal {
    Decimal::new(value, 0)
}

fn register(store: &mut AccountStore, username: &str, secret: &str) {
    let registration = store
        .prepare_registration("1234567890", username, "alice@bank.com", secret, secret)
        .unwrap();
    store.commit_registration(registration).unwrap();
}

#[test]
fn register_alice_yields_zero_balance_and_empty_ledger() {
    let dir = tempdir().unwrap();
    let mut store = AccountStore::open(dir.path().join("accounts.txt")).unwrap();

    register(&mut store, "alice1", "secret");

    let account = store.get("alice1").unwrap();
    assert_eq!(account.balance, Decimal::ZERO);
    assert!(account.ledger.is_empty());
}

#[test]
fn deposit_then_withdraw_leaves_balance_and_ledger_in_order() {
    let dir = tempdir().unwrap();
    let mut store = AccountStore::open(dir.path().join("accounts.txt")).unwrap();
    register(&mut store, "alice1", "secret");

    let mut engine = TransactionEngine::new(&mut store);
    engine.deposit("alice1", dec(100)).unwrap();
    engine.withdraw("alice1", dec(40)).unwrap();

    assert_eq!(engine.balance("alice1").unwrap(), dec(60));
    let ledger = engine.history("alice1").unwrap().unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger[0].description, "Deposit of 100");
    assert_eq!(ledger[1].description, "Withdrawal of 40");
}

#[test]
fn overdraw_is_rejected_and_appends_nothing() {
    let dir = tempdir().unwrap();
    let mut store = AccountStore::open(dir.path().join("accounts.txt")).unwrap();
    register(&mut store, "alice1", "secret");

    let mut engine = TransactionEngine::new(&mut store);
    engine.deposit("alice1", dec(60)).unwrap();

    let result = engine.withdraw("alice1", dec(1000));
    assert_eq!(
        result.unwrap_err(),
        TellerError::insufficient_funds(dec(60), dec(1000))
    );
    assert_eq!(engine.balance("alice1").unwrap(), dec(60));
    assert_eq!(engine.history("alice1").unwrap().unwrap().len(), 1);
}

#[test]
fn state_survives_a_process_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.txt");

    {
        let mut store = AccountStore::open(&path).unwrap();
        register(&mut store, "alice1", "secret");
        let mut engine = TransactionEngine::new(&mut store);
        engine.deposit("alice1", Decimal::new(1025, 2)).unwrap();
    }

    let store = AccountStore::open(&path).unwrap();
    let account = store.get("alice1").unwrap();
    assert_eq!(account.balance, Decimal::new(1025, 2));
    assert_eq!(account.ledger.len(), 1);
    assert_eq!(account.ledger[0].description, "Deposit of 10.25");
    assert!(account.credential.verify("secret"));
}

#[test]
fn duplicate_username_leaves_store_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.txt");
    let mut store = AccountStore::open(&path).unwrap();
    register(&mut store, "alice1", "secret");
    let saved = fs::read_to_string(&path).unwrap();

    let result =
        store.prepare_registration("9876543210", "alice1", "new@bank.com", "other", "other");
    assert!(matches!(result, Err(TellerError::UsernameTaken { .. })));

    assert_eq!(store.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), saved);
}

#[test]
fn malformed_ledger_line_is_skipped_but_the_rest_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.txt");
    let credential = CredentialHash::new("secret").to_string();
    fs::write(
        &path,
        format!(
            "1234567890,alice1,alice@bank.com,{},60\n\
             garbage without a timestamp\n\
             2024-01-15 10:31:00:Withdrawal of 40\n\
             ---\n",
            credential
        ),
    )
    .unwrap();

    let store = AccountStore::open(&path).unwrap();
    let account = store.get("alice1").unwrap();
    assert_eq!(account.balance, dec(60));
    assert_eq!(account.ledger.len(), 1);
    assert_eq!(account.ledger[0].description, "Withdrawal of 40");
}

#[test]
fn missing_backing_file_is_created_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.txt");

    let store = AccountStore::open(&path).unwrap();
    assert!(store.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn escaped_descriptions_round_trip_through_the_backing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.txt");
    let credential = CredentialHash::new("secret").to_string();
    fs::write(
        &path,
        format!(
            "1234567890,alice1,alice@bank.com,{},0\n\
             2024-01-15 10:30:00:notes\\: a\\,b\n\
             ---\n",
            credential
        ),
    )
    .unwrap();

    let store = AccountStore::open(&path).unwrap();
    assert_eq!(
        store.get("alice1").unwrap().ledger[0].description,
        "notes: a,b"
    );

    // A full rewrite re-escapes the reserved characters
    store.save().unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("notes\\: a\\,b"));
}
