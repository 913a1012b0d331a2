//! Interactive shell
//!
//! Line-based prompt loop around the core: menu rendering, input
//! re-prompting, and nothing else. All invariants live behind the store,
//! engine, and authentication gate; the shell only decides which core
//! operation to call next and renders its outcome.
//!
//! Generic over its input and output streams so the whole surface can be
//! exercised in tests with scripted input.

use crate::core::{validate, AccountStore, LoginSession, LoginStep, TransactionEngine};
use crate::io::TIMESTAMP_FORMAT;
use crate::types::TellerError;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// The interactive menu loop
///
/// Reads lines from `input`, writes prompts and results to `output`, and
/// drives a borrowed [`AccountStore`]. End of input anywhere behaves like
/// choosing to exit.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell over the given streams
    pub fn new(input: R, output: W) -> Self {
        Shell { input, output }
    }

    /// Run the top-level menu until the operator exits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error only when the output stream itself fails; core
    /// errors are rendered and control returns to the menu.
    pub fn run(&mut self, store: &mut AccountStore) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Welcome to Teller!")?;
            writeln!(self.output, "1. Register")?;
            writeln!(self.output, "2. Log in")?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                return Ok(());
            };

            match choice.to_lowercase().as_str() {
                "1" | "r" => self.register(store)?,
                "2" | "l" => {
                    if let Some(username) = self.login(store)? {
                        self.session(store, &username)?;
                    }
                }
                "3" | "x" => {
                    writeln!(self.output, "Thank you for using Teller. Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option. Please select a valid option.")?,
            }
        }
    }

    /// Registration flow with field-scoped re-prompting
    ///
    /// Each field is collected until it validates on its own; a failure
    /// never resets the other fields. The registration is only committed
    /// after the operator confirms the summary.
    fn register(&mut self, store: &mut AccountStore) -> io::Result<()> {
        writeln!(self.output, "Account registration")?;

        let id = loop {
            let Some(id) = self.prompt("Enter your national ID: ")? else {
                return Ok(());
            };
            match validate::validate_id(&id) {
                Ok(()) => break id,
                Err(error) => writeln!(self.output, "Error: {}", error)?,
            }
        };

        let username = loop {
            let Some(username) = self.prompt("Enter your username: ")? else {
                return Ok(());
            };
            if store.contains(&username) {
                let error = TellerError::username_taken(&username);
                writeln!(self.output, "Error: {}", error)?;
                continue;
            }
            match validate::validate_username(&username) {
                Ok(()) => break username,
                Err(error) => writeln!(self.output, "Error: {}", error)?,
            }
        };

        let email = loop {
            let Some(email) = self.prompt("Enter your email address: ")? else {
                return Ok(());
            };
            match validate::validate_email(&email) {
                Ok(()) => break email,
                Err(error) => writeln!(self.output, "Error: {}", error)?,
            }
        };

        let credential = loop {
            let Some(secret) = self.prompt("Enter your credential: ")? else {
                return Ok(());
            };
            let Some(confirmation) = self.prompt("Re-enter your credential: ")? else {
                return Ok(());
            };
            match validate::validate_credential(&secret, &confirmation) {
                Ok(()) => break secret,
                Err(error) => writeln!(self.output, "Error: {}", error)?,
            }
        };

        writeln!(self.output)?;
        writeln!(self.output, "Registration details:")?;
        writeln!(self.output, "  National ID: {}", id)?;
        writeln!(self.output, "  Username: {}", username)?;
        writeln!(self.output, "  Email: {}", email)?;
        writeln!(self.output, "  Opening balance: $0")?;
        let Some(answer) = self.prompt("Save this registration? (yes/no): ")? else {
            return Ok(());
        };

        if is_yes(&answer) {
            let registration =
                store.prepare_registration(&id, &username, &email, &credential, &credential);
            let committed =
                registration.and_then(|registration| store.commit_registration(registration));
            match committed {
                Ok(_) => writeln!(self.output, "Registration saved.")?,
                Err(error) => writeln!(self.output, "Error: {}", error)?,
            }
        } else {
            writeln!(self.output, "Registration discarded.")?;
        }
        Ok(())
    }

    /// Login flow driving the authentication gate
    ///
    /// Returns the authenticated username, or `None` when the session
    /// locked out, the operator diverted to registration, or input ended.
    fn login(&mut self, store: &mut AccountStore) -> io::Result<Option<String>> {
        writeln!(self.output, "Log in")?;
        let mut session = LoginSession::new();

        loop {
            let Some(username) = self.prompt("Enter your username: ")? else {
                return Ok(None);
            };
            if username.is_empty() {
                writeln!(self.output, "A username is required.")?;
                continue;
            }
            match session.submit_username(store, &username) {
                LoginStep::UnknownUsername => {
                    writeln!(self.output, "No account exists for that username.")?;
                    let Some(answer) =
                        self.prompt("Would you like to register instead? (yes/no): ")?
                    else {
                        return Ok(None);
                    };
                    if is_yes(&answer) {
                        self.register(store)?;
                        return Ok(None);
                    }
                }
                LoginStep::CredentialRequired { .. } => break,
                _ => return Ok(None),
            }
        }

        loop {
            let Some(secret) = self.prompt("Enter your credential: ")? else {
                return Ok(None);
            };
            if secret.is_empty() {
                writeln!(self.output, "A credential is required.")?;
                continue;
            }
            match session.submit_credential(store, &secret) {
                LoginStep::Authenticated { username } => {
                    writeln!(self.output, "Login successful.")?;
                    return Ok(Some(username));
                }
                LoginStep::WrongCredential { attempts_remaining } => {
                    writeln!(
                        self.output,
                        "Incorrect credential. Attempts remaining: {}",
                        attempts_remaining
                    )?;
                }
                LoginStep::LockedOut => {
                    writeln!(
                        self.output,
                        "Too many failed attempts. This session is locked out."
                    )?;
                    return Ok(None);
                }
                _ => return Ok(None),
            }
        }
    }

    /// Post-login menu for the authenticated username
    fn session(&mut self, store: &mut AccountStore, username: &str) -> io::Result<()> {
        let mut engine = TransactionEngine::new(store);
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Available operations:")?;
            writeln!(self.output, "1. Withdraw")?;
            writeln!(self.output, "2. Deposit")?;
            writeln!(self.output, "3. Balance inquiry")?;
            writeln!(self.output, "4. Transaction history")?;
            writeln!(self.output, "5. Log out")?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => {
                    let Some(amount) = self.prompt_amount("Enter the amount to withdraw: ")?
                    else {
                        return Ok(());
                    };
                    match engine.withdraw(username, amount) {
                        Ok(balance) => writeln!(
                            self.output,
                            "Withdrawal successful. Current balance: ${}",
                            balance
                        )?,
                        Err(error) => writeln!(self.output, "Error: {}", error)?,
                    }
                }
                "2" => {
                    let Some(amount) = self.prompt_amount("Enter the amount to deposit: ")?
                    else {
                        return Ok(());
                    };
                    match engine.deposit(username, amount) {
                        Ok(balance) => writeln!(
                            self.output,
                            "Deposit successful. Current balance: ${}",
                            balance
                        )?,
                        Err(error) => writeln!(self.output, "Error: {}", error)?,
                    }
                }
                "3" => match engine.balance(username) {
                    Ok(balance) => {
                        writeln!(self.output, "Your current balance is: ${}", balance)?
                    }
                    Err(error) => writeln!(self.output, "Error: {}", error)?,
                },
                "4" => match engine.history(username) {
                    Ok(None) => writeln!(self.output, "No transactions available.")?,
                    Ok(Some(entries)) => {
                        writeln!(self.output, "Transactions:")?;
                        for entry in entries {
                            writeln!(
                                self.output,
                                "{}: {}",
                                entry.timestamp.format(TIMESTAMP_FORMAT),
                                entry.description
                            )?;
                        }
                    }
                    Err(error) => writeln!(self.output, "Error: {}", error)?,
                },
                "5" => {
                    writeln!(self.output, "Logged out.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option. Please select a valid option.")?,
            }
        }
    }

    /// Prompt until the operator enters a decimal amount
    ///
    /// Non-numeric entry re-prompts here; the sign and magnitude checks
    /// belong to the engine.
    fn prompt_amount(&mut self, message: &str) -> io::Result<Option<Decimal>> {
        loop {
            let Some(raw) = self.prompt(message)? else {
                return Ok(None);
            };
            match Decimal::from_str(&raw) {
                Ok(amount) => return Ok(Some(amount)),
                Err(_) => writeln!(self.output, "Enter a numeric amount.")?,
            }
        }
    }

    /// Write a prompt and read one trimmed line; `None` on end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Cursor;
    use tempfile::tempdir;

    /// Run a scripted session against a fresh store, returning the output
    /// and the store for further assertions
    fn run_script(script: &str) -> (String, AccountStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let mut store = AccountStore::open(dir.path().join("accounts.txt")).unwrap();
        let output = run_script_with(&mut store, script);
        (output, store, dir)
    }

    fn run_script_with(store: &mut AccountStore, script: &str) -> String {
        let mut output = Vec::new();
        let mut shell = Shell::new(Cursor::new(script.to_string()), &mut output);
        shell.run(store).unwrap();
        String::from_utf8(output).unwrap()
    }

    const REGISTER_ALICE: &str =
        "1\n1234567890\nalice1\nalice@bank.com\nsecret\nsecret\nyes\n3\n";

    #[test]
    fn test_register_and_exit() {
        let (output, store, _dir) = run_script(REGISTER_ALICE);

        assert!(output.contains("Registration saved."));
        assert!(output.contains("Thank you for using Teller. Goodbye!"));
        let account = store.get("alice1").unwrap();
        assert_eq!(account.balance, Decimal::ZERO);
        assert!(account.ledger.is_empty());
    }

    #[test]
    fn test_registration_discarded_commits_nothing() {
        let script = "1\n1234567890\nalice1\nalice@bank.com\nsecret\nsecret\nno\n3\n";
        let (output, store, _dir) = run_script(script);

        assert!(output.contains("Registration discarded."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_field_reprompts_that_field_only() {
        // Bad id once, bad email once, mismatched credentials once
        let script = "1\n123\n1234567890\nalice1\nalice@bank.org\nalice@bank.com\n\
                      secret\ntypo\nsecret\nsecret\nyes\n3\n";
        let (output, store, _dir) = run_script(script);

        assert!(output.contains("Invalid national ID '123'"));
        assert!(output.contains("Invalid email address 'alice@bank.org'"));
        assert!(output.contains("The credentials do not match"));
        assert!(output.contains("Registration saved."));
        assert!(store.contains("alice1"));
    }

    #[test]
    fn test_login_deposit_withdraw_history() {
        let (_output, mut store, _dir) = run_script(REGISTER_ALICE);

        let script = "2\nalice1\nsecret\n2\n100\n1\n40\n3\n4\n5\n3\n";
        let output = run_script_with(&mut store, script);

        assert!(output.contains("Login successful."));
        assert!(output.contains("Deposit successful. Current balance: $100"));
        assert!(output.contains("Withdrawal successful. Current balance: $60"));
        assert!(output.contains("Your current balance is: $60"));
        assert!(output.contains("Deposit of 100"));
        assert!(output.contains("Withdrawal of 40"));
        assert!(output.contains("Logged out."));
    }

    #[test]
    fn test_overdraw_is_reported_and_balance_unchanged() {
        let (_output, mut store, _dir) = run_script(REGISTER_ALICE);

        let script = "2\nalice1\nsecret\n2\n60\n1\n1000\n3\n5\n3\n";
        let output = run_script_with(&mut store, script);

        assert!(output.contains("Error: Insufficient funds: balance 60, requested 1000"));
        assert!(output.contains("Your current balance is: $60"));
    }

    #[test]
    fn test_empty_history_renders_distinct_message() {
        let (_output, mut store, _dir) = run_script(REGISTER_ALICE);

        let output = run_script_with(&mut store, "2\nalice1\nsecret\n4\n5\n3\n");
        assert!(output.contains("No transactions available."));
        assert!(!output.contains("Transactions:"));
    }

    #[test]
    fn test_non_numeric_amount_reprompts() {
        let (_output, mut store, _dir) = run_script(REGISTER_ALICE);

        let script = "2\nalice1\nsecret\n2\nabc\n100\n5\n3\n";
        let output = run_script_with(&mut store, script);

        assert!(output.contains("Enter a numeric amount."));
        assert!(output.contains("Deposit successful. Current balance: $100"));
    }

    #[test]
    fn test_three_wrong_credentials_lock_the_session_out() {
        let (_output, mut store, _dir) = run_script(REGISTER_ALICE);

        let script = "2\nalice1\nbad\nbad\nbad\n3\n";
        let output = run_script_with(&mut store, script);

        assert!(output.contains("Incorrect credential. Attempts remaining: 2"));
        assert!(output.contains("Incorrect credential. Attempts remaining: 1"));
        assert!(output.contains("Too many failed attempts. This session is locked out."));
        assert!(!output.contains("Login successful."));
    }

    #[test]
    fn test_unknown_username_offers_registration() {
        let script = "2\nbob\nyes\n1234567890\nbob2\nbob@bank.com\npw\npw\nyes\n3\n";
        let (output, store, _dir) = run_script(script);

        assert!(output.contains("No account exists for that username."));
        assert!(output.contains("Registration saved."));
        assert!(store.contains("bob2"));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let (output, store, _dir) = run_script("");
        assert!(output.contains("Select an option: "));
        assert!(store.is_empty());
    }
}
