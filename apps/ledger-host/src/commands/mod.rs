//! # Commands Module
//!
//! All commands exposed to the table UI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── item.rs      ◄─── Item table edits and options
//! ├── tax.rs       ◄─── Tax table edits and options
//! ├── item_tax.rs  ◄─── Association edits and display rows
//! └── ledger.rs    ◄─── Whole-ledger reads, reducer dispatch, reset
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Table cell edit                                                        │
//! │  ───────────────                                                        │
//! │  update_item(&ledger, ItemId(1), &json!({ "rate": "20" }))              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ItemPatch::from_json ── malformed? ──► Err(ApiError)                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  LedgerState::mutate ── Rule A, cascade ──► LedgerSnapshot              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  UI re-renders all three tables from the snapshot                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod item;
pub mod item_tax;
pub mod ledger;
pub mod tax;
