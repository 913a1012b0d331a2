//! Teller CLI
//!
//! Interactive command-line banking simulator backed by a flat text file.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-file /path/to/accounts.txt
//! ```
//!
//! The program hydrates account state from the backing file at startup,
//! drives an interactive register/login menu on stdin/stdout, and rewrites
//! the file after every state-changing operation.
//!
//! Diagnostics are emitted on stderr via `tracing`; set `RUST_LOG` to
//! adjust verbosity (warnings are shown by default).
//!
//! # Exit Codes
//!
//! - 0: Success (including exit via end of input)
//! - 1: Error (backing file unreadable, terminal I/O failure, etc.)

use std::io;
use std::process;
use teller::cli;
use teller::{AccountStore, Shell};
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Diagnostics go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    // Hydrate the store from the injected backing file
    let mut store = match AccountStore::open(&args.data_file) {
        Ok(store) => store,
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    };

    // Run the interactive loop over stdin/stdout
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock());
    if let Err(error) = shell.run(&mut store) {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}
