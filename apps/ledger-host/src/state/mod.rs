//! # State Module
//!
//! Host state, split the same way commands consume it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────────┬──────────────────────┐                │
//! │          ▼                                             ▼                │
//! │  ┌────────────────────────┐                 ┌──────────────────┐        │
//! │  │     LedgerState        │                 │   ConfigState    │        │
//! │  │                        │                 │                  │        │
//! │  │  Arc<Mutex<            │                 │  seed_demo_data  │        │
//! │  │    LedgerSession       │                 │  currency_symbol │        │
//! │  │  >>                    │                 │  display_decimals│        │
//! │  └────────────────────────┘                 └──────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • LedgerState: single writer at a time through the Mutex              │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod ledger;

pub use config::ConfigState;
pub use ledger::{LedgerSession, LedgerSnapshot, LedgerState};
