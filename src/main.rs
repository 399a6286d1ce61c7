//! Rust ATM Engine CLI
//!
//! Command-line interface for replaying ATM action scripts from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv > state.csv
//! cargo run -- --strategy async script.csv > state.csv
//! cargo run -- --session-file session.json script.csv > state.csv
//! cargo run -- --strategy async --batch-size 500 --queue-capacity 32 --workers 4 script.csv
//! ```
//!
//! The program reads actions from the script, applies them to one session
//! using the selected strategy, and writes the final state to stdout. Logs go
//! to stderr; set `RUST_LOG` to change verbosity.
//!
//! # Exit Codes
//!
//! - 0: Success (rejected actions and skipped records included)
//! - 1: Error (missing arguments, file not found, runtime failure, etc.)

use rust_atm_engine::cli;
use rust_atm_engine::strategy;
use std::process;

fn main() {
    cli::init_tracing();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_dispatch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config, args.session_file.clone())
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
