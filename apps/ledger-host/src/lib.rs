//! # Ledger Host Library
//!
//! Host layer between the table UI and `ledger-core`.
//!
//! ## Module Organization
//! ```text
//! ledger_host/
//! ├── lib.rs          ◄─── You are here (bootstrap & tracing)
//! ├── main.rs         ◄─── stdin/stdout action driver
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── ledger.rs   ◄─── Shared ledger session
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── item.rs     ◄─── Item commands
//! │   ├── tax.rs      ◄─── Tax commands
//! │   ├── item_tax.rs ◄─── Association commands and rows
//! │   └── ledger.rs   ◄─── Snapshot, dispatch, reset
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{ConfigState, LedgerState};

/// Everything a command may ask for.
#[derive(Debug, Clone)]
pub struct AppState {
    pub ledger: LedgerState,
    pub config: ConfigState,
}

/// Starts the host.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Host Startup                                      │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, DEBUG for ledger crates, RUST_LOG overrides        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • LEDGER_* environment variables over defaults                      │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • LedgerState: demo or empty ledger per config                      │
/// │     • ConfigState: read-only from here on                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn bootstrap() -> AppState {
    init_tracing();
    bootstrap_with(ConfigState::from_env())
}

/// Builds the host state from an explicit configuration.
pub fn bootstrap_with(config: ConfigState) -> AppState {
    let ledger = LedgerState::new(commands::ledger::initial_ledger(&config));
    info!(
        seed_demo_data = config.seed_demo_data,
        currency_symbol = %config.currency_symbol,
        display_decimals = config.display_decimals,
        "Ledger session opened"
    );

    AppState { ledger, config }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=trace` - Show per-association total changes
/// - `RUST_LOG=ledger_core=warn` - Silence the engine
/// - Default: INFO, DEBUG for the ledger crates
///
/// Safe to call more than once; later calls leave the first subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ledger_core=debug,ledger_host=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
