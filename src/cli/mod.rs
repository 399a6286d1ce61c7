// CLI module
// Command-line interface, argument parsing and log setup

mod args;
mod logging;

pub use args::{CliArgs, StrategyType};
pub use logging::init_tracing;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing input, or `--help`), clap
/// prints the error or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
