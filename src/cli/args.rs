use crate::strategy::DispatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay ATM session scripts through the account state machine
#[derive(Parser, Debug)]
#[command(name = "atm-engine")]
#[command(about = "Replay ATM session scripts through the account state machine", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing the action script
    #[arg(value_name = "INPUT", help = "Path to the action script CSV file")]
    pub input_file: PathBuf,

    /// Replay strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Replay strategy: 'sync' for in-thread or 'async' for the session dispatcher"
    )]
    pub strategy: StrategyType,

    /// Persisted session record (restored at start-up, written on login/logout/dark mode)
    #[arg(
        long = "session-file",
        value_name = "PATH",
        help = "JSON file holding the persisted identity and dark-mode preference"
    )]
    pub session_file: Option<PathBuf>,

    /// Number of script records per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of script records read per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Dispatcher queue capacity (async mode only)
    #[arg(
        long = "queue-capacity",
        value_name = "COUNT",
        help = "Number of actions queued ahead of the dispatcher (default: 64)"
    )]
    pub queue_capacity: Option<usize>,

    /// Runtime worker threads (async mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of tokio worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,
}

/// Available replay strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a DispatchConfig from CLI arguments
    ///
    /// Missing values take their defaults; zero values fall back to defaults
    /// with a warning (see [`DispatchConfig::new`]).
    pub fn to_dispatch_config(&self) -> DispatchConfig {
        if self.batch_size.is_none() && self.queue_capacity.is_none() && self.workers.is_none() {
            return DispatchConfig::default();
        }

        let default = DispatchConfig::default();
        DispatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.queue_capacity.unwrap_or(default.queue_capacity),
            self.workers.unwrap_or(default.worker_threads),
        )
    }
}
