//! # ledger-core: Pure Recalculation Engine
//!
//! This crate is the **heart** of the ledger. It holds line items, tax rules
//! and item-tax associations, and keeps their derived values consistent.
//! It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ledger Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation layer                           │   │
//! │  │     Item table ──► Tax table ──► Item Tax table                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / actions                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ledger-host                                  │   │
//! │  │    shared state, update_item, dispatch_action, get_ledger...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ledger-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  types   │  │   calc   │  │  engine  │  │    ledger    │   │   │
//! │  │   │ Item     │  │ amount   │  │ Rule A   │  │ Mutation API │   │   │
//! │  │   │ Tax      │  │ tax      │  │ Rule B   │  │ dispatch     │   │   │
//! │  │   │ ItemTax  │  │ round2   │  │ Rule C   │  │              │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Tax, ItemTax, ids)
//! - [`store`] - Insert-only collections with max-plus-one ids
//! - [`calc`] - Amount and tax calculators, decimal rounding
//! - [`engine`] - When the calculators run (propagation rules)
//! - [`ledger`] - The Mutation API
//! - [`patch`] - Partial updates with explicit per-field presence
//! - [`action`] - Reducer actions
//! - [`validation`] - Coercion of loosely typed host values
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same ledger + same edit = same ledger
//! 2. **No I/O**: events go through `tracing`, nothing else leaves the crate
//! 3. **Never Stale**: every Mutation API call returns with fresh derived values
//! 4. **Fail Soft**: unknown ids, dangling references and bad numbers degrade
//!    to defined defaults instead of errors
//!
//! ## Example Usage
//!
//! ```rust
//! use ledger_core::{ItemPatch, Ledger};
//!
//! let mut ledger = Ledger::demo();
//!
//! // Pen: 2 × 10 → 2 × 20
//! ledger.update_item(ledger_core::ItemId(1), &ItemPatch::new().rate(20.0));
//!
//! // GST 18% of 40 = 7.20
//! let totals = ledger.read_all_associations_with_fresh_totals();
//! assert_eq!(totals[0].total, 7.2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod action;
pub mod calc;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod patch;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use action::Action;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::Ledger;
pub use patch::{Field, ItemPatch, ItemTaxPatch, TaxPatch};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity of a freshly added item.
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Fractional digits kept by percentage tax totals.
pub const TOTAL_DECIMALS: usize = 2;

/// Reference used by a new association when its collection is empty.
///
/// Ids start at 1, so this points at whatever row gets added first.
pub const FALLBACK_REFERENCE_ID: u32 = 1;
