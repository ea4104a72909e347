//! # Recalculation Engine
//!
//! Decides when the calculators run so that derived fields are never stale
//! when read.
//!
//! ## Propagation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Propagation Rules                                    │
//! │                                                                         │
//! │  Rule A   update item with quantity/rate in payload                     │
//! │           └──► recalc_amount(item)          (that item only)            │
//! │                                                                         │
//! │  Rule B   any change to the Item or Tax collection                      │
//! │           └──► cascade_totals(..)           (every association)         │
//! │                                                                         │
//! │  Rule C   association itemId/taxId replaced                             │
//! │           └──► recompute_total(assoc)       (that association only)     │
//! │                                                                         │
//! │  Rule B is the source of truth. Rule C computes exactly what the next   │
//! │  cascade would, so applying it early never changes the end result.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dangling References
//! An association whose `item_id` or `tax_id` matches no row is skipped: its
//! `total` keeps the last computed (or directly written) value until both
//! references point at existing rows again. This is a defined lenient state,
//! not an error, and nothing here reports it.
//!
//! ## Determinism
//! Associations do not depend on each other and share no accumulator, so the
//! cascade gives the same totals in any order and any number of times.

use tracing::{debug, trace};

use crate::calc::{compute_amount, compute_tax};
use crate::types::{Item, ItemTax, Tax};

/// Rule A: recomputes `amount` from the item's current quantity and rate.
pub fn recalc_amount(item: &mut Item) {
    item.amount = compute_amount(item.quantity, item.rate);
    debug!(id = %item.id, amount = item.amount, "Amount recalculated");
}

/// Fresh total for `item_tax`, or `None` if either reference dangles.
pub fn fresh_total(items: &[Item], taxes: &[Tax], item_tax: &ItemTax) -> Option<f64> {
    let item = items.iter().find(|item| item.id == item_tax.item_id)?;
    let tax = taxes.iter().find(|tax| tax.id == item_tax.tax_id)?;
    Some(compute_tax(item, tax))
}

/// Rule C: recomputes one association in place.
///
/// Returns `false` (and leaves `total` alone) when a reference dangles.
pub fn recompute_total(items: &[Item], taxes: &[Tax], item_tax: &mut ItemTax) -> bool {
    match fresh_total(items, taxes, item_tax) {
        Some(total) => {
            if total != item_tax.total {
                trace!(
                    id = %item_tax.id,
                    from = item_tax.total,
                    to = total,
                    "Association total updated"
                );
            }
            item_tax.total = total;
            true
        }
        None => false,
    }
}

/// Rule B: recomputes every association in place.
///
/// Returns how many associations resolved (and were therefore recomputed).
pub fn cascade_totals(items: &[Item], taxes: &[Tax], item_taxes: &mut [ItemTax]) -> usize {
    let resolved = item_taxes
        .iter_mut()
        .map(|item_tax| recompute_total(items, taxes, item_tax))
        .filter(|resolved| *resolved)
        .count();

    debug!(
        resolved,
        dangling = item_taxes.len() - resolved,
        "Recalculated association totals"
    );
    resolved
}

/// Rule B as a pure function: returns the associations with fresh totals.
///
/// ```rust
/// use ledger_core::engine::recompute_all_totals;
/// use ledger_core::{Item, ItemId, ItemTax, ItemTaxId, Tax, TaxId};
///
/// let mut item = Item::new(ItemId(1));
/// item.amount = 40.0;
/// let mut tax = Tax::new(TaxId(1));
/// tax.charge = 18.0;
/// let assoc = ItemTax { id: ItemTaxId(1), item_id: ItemId(1), tax_id: TaxId(1), total: 3.6 };
///
/// let fresh = recompute_all_totals(&[item], &[tax], &[assoc]);
/// assert_eq!(fresh[0].total, 7.2);
/// ```
pub fn recompute_all_totals(items: &[Item], taxes: &[Tax], item_taxes: &[ItemTax]) -> Vec<ItemTax> {
    let mut fresh = item_taxes.to_vec();
    cascade_totals(items, taxes, &mut fresh);
    fresh
}

// =============================================================================
// Unit Tests
// =============================================================================
