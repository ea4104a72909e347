//! # Ledger
//!
//! The entity store plus the Mutation API. This is the only way to change
//! the three collections, and every operation leaves derived fields fresh
//! before it returns.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mutation API                                         │
//! │                                                                         │
//! │  Operation                     Store change          Recalculation      │
//! │  ─────────                     ────────────          ─────────────      │
//! │  add_item()                    items.push            Rule B             │
//! │  update_item(id, patch)        merge fields          Rule A?, Rule B    │
//! │  add_tax()                     taxes.push            Rule B             │
//! │  update_tax(id, patch)         merge fields          Rule B             │
//! │  add_item_tax()                item_taxes.push       Rule C             │
//! │  update_item_tax(id, patch)    merge fields          Rule C             │
//! │  update_item_tax_references()  replace both keys     Rule C             │
//! │                                                                         │
//! │  read_all_associations_with_fresh_totals() ─► Rule B on a copy          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Updates to ids that do not exist are silent no-ops.
//!
//! ## Usage
//! ```rust
//! use ledger_core::{ItemPatch, Ledger, TaxPatch};
//!
//! let mut ledger = Ledger::new();
//! let item = ledger.add_item().id;
//! ledger.update_item(item, &ItemPatch::new().quantity(2.0).rate(10.0));
//! let tax = ledger.add_tax().id;
//! ledger.update_tax(tax, &TaxPatch::new().charge(18.0));
//! ledger.add_item_tax();
//!
//! let totals = ledger.read_all_associations_with_fresh_totals();
//! assert_eq!(totals[0].total, 3.6);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::action::Action;
use crate::engine::{cascade_totals, fresh_total, recalc_amount, recompute_all_totals, recompute_total};
use crate::patch::{ItemPatch, ItemTaxPatch, TaxPatch};
use crate::store::{Entity, Table};
use crate::types::{Item, ItemId, ItemTax, ItemTaxId, SelectOption, Tax, TaxId, TaxOn, TaxType};
use crate::FALLBACK_REFERENCE_ID;

/// The three collections and the operations that keep them consistent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    items: Table<Item>,
    taxes: Table<Tax>,
    item_taxes: Table<ItemTax>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample ledger the table demo starts with.
    ///
    /// | Items            | Taxes                          | Item taxes        |
    /// |------------------|--------------------------------|-------------------|
    /// | 1 Pen  2 × 10    | 1 GST  Percentage 18  On Item  | 1 Pen/GST   3.60  |
    /// | 2 Book 1 × 100   | 2 CESS Amount 5       On Order | 2 Book/CESS 5.00  |
    pub fn demo() -> Self {
        let mut ledger = Ledger::new();

        let pen = ledger.add_item().id;
        ledger.update_item(pen, &ItemPatch::new().product("Pen").quantity(2.0).rate(10.0));
        let book = ledger.add_item().id;
        ledger.update_item(book, &ItemPatch::new().product("Book").quantity(1.0).rate(100.0));

        let gst = ledger.add_tax().id;
        ledger.update_tax(
            gst,
            &TaxPatch::new()
                .tax("GST")
                .tax_type(TaxType::Percentage)
                .tax_on(TaxOn::OnItem)
                .charge(18.0),
        );
        let cess = ledger.add_tax().id;
        ledger.update_tax(
            cess,
            &TaxPatch::new()
                .tax("CESS")
                .tax_type(TaxType::Amount)
                .tax_on(TaxOn::OnOrder)
                .charge(5.0),
        );

        let pen_gst = ledger.add_item_tax().id;
        ledger.update_item_tax_references(pen_gst, pen, gst);
        let book_cess = ledger.add_item_tax().id;
        ledger.update_item_tax_references(book_cess, book, cess);

        ledger
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    pub fn items(&self) -> &[Item] {
        self.items.as_slice()
    }

    pub fn taxes(&self) -> &[Tax] {
        self.taxes.as_slice()
    }

    /// Associations as stored.
    ///
    /// Totals here are already fresh after any Mutation API call; use
    /// [`Ledger::read_all_associations_with_fresh_totals`] when that
    /// guarantee must not depend on how the ledger was reached.
    pub fn item_taxes(&self) -> &[ItemTax] {
        self.item_taxes.as_slice()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn tax(&self, id: TaxId) -> Option<&Tax> {
        self.taxes.get(id)
    }

    pub fn item_tax(&self, id: ItemTaxId) -> Option<&ItemTax> {
        self.item_taxes.get(id)
    }

    /// Item picker entries, in collection order.
    pub fn item_options(&self) -> Vec<SelectOption> {
        self.items
            .iter()
            .map(|item| SelectOption {
                value: item.id.0,
                label: item.label(),
            })
            .collect()
    }

    /// Tax picker entries, in collection order.
    pub fn tax_options(&self) -> Vec<SelectOption> {
        self.taxes
            .iter()
            .map(|tax| SelectOption {
                value: tax.id.0,
                label: tax.label(),
            })
            .collect()
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Appends an item with default fields.
    pub fn add_item(&mut self) -> Item {
        let item = self.items.insert_with(Item::new).clone();
        debug!(id = %item.id, "Added item");
        self.recalculate_totals();
        item
    }

    /// Merges `patch` into the item with `id`.
    ///
    /// Recomputes `amount` only if the patch sends `quantity` or `rate`.
    pub fn update_item(&mut self, id: ItemId, patch: &ItemPatch) {
        let Some(item) = self.items.get_mut(id) else {
            debug!(%id, "Ignoring update for unknown item");
            return;
        };

        debug!(%id, ?patch, "Updating item");
        patch.apply_to(item);
        if patch.touches_amount_inputs() {
            recalc_amount(item);
        }
        self.recalculate_totals();
    }

    // =========================================================================
    // Taxes
    // =========================================================================

    /// Appends a tax with default fields.
    pub fn add_tax(&mut self) -> Tax {
        let tax = self.taxes.insert_with(Tax::new).clone();
        debug!(id = %tax.id, "Added tax");
        self.recalculate_totals();
        tax
    }

    /// Merges `patch` into the tax with `id`.
    pub fn update_tax(&mut self, id: TaxId, patch: &TaxPatch) {
        let Some(tax) = self.taxes.get_mut(id) else {
            debug!(%id, "Ignoring update for unknown tax");
            return;
        };

        debug!(%id, ?patch, "Updating tax");
        patch.apply_to(tax);
        self.recalculate_totals();
    }

    // =========================================================================
    // Item Taxes
    // =========================================================================

    /// Appends an association pointing at the first item and first tax.
    ///
    /// With an empty collection the reference falls back to id `1`, which
    /// dangles until a row with that id is added; the total then starts at 0.
    pub fn add_item_tax(&mut self) -> ItemTax {
        let item_id = self
            .items
            .first()
            .map_or(ItemId(FALLBACK_REFERENCE_ID), Entity::id);
        let tax_id = self
            .taxes
            .first()
            .map_or(TaxId(FALLBACK_REFERENCE_ID), Entity::id);

        let items = self.items.as_slice();
        let taxes = self.taxes.as_slice();
        let item_tax = self
            .item_taxes
            .insert_with(|id| {
                let mut item_tax = ItemTax {
                    id,
                    item_id,
                    tax_id,
                    total: 0.0,
                };
                item_tax.total = fresh_total(items, taxes, &item_tax).unwrap_or(0.0);
                item_tax
            })
            .clone();

        debug!(
            id = %item_tax.id,
            item_id = %item_tax.item_id,
            tax_id = %item_tax.tax_id,
            total = item_tax.total,
            "Added item tax"
        );
        item_tax
    }

    /// Merges `patch` into the association with `id` and recomputes its
    /// total if both references resolve.
    pub fn update_item_tax(&mut self, id: ItemTaxId, patch: &ItemTaxPatch) {
        let Some(item_tax) = self.item_taxes.get_mut(id) else {
            debug!(%id, "Ignoring update for unknown item tax");
            return;
        };

        debug!(%id, ?patch, "Updating item tax");
        patch.apply_to(item_tax);
        recompute_total(self.items.as_slice(), self.taxes.as_slice(), item_tax);
    }

    /// Replaces both references of an association.
    pub fn update_item_tax_references(&mut self, id: ItemTaxId, item_id: ItemId, tax_id: TaxId) {
        self.update_item_tax(id, &ItemTaxPatch::references(item_id, tax_id));
    }

    // =========================================================================
    // Recalculation
    // =========================================================================

    /// Associations with totals recomputed from the current items and taxes.
    ///
    /// Does not modify the ledger; dangling associations are returned with
    /// their stored total.
    pub fn read_all_associations_with_fresh_totals(&self) -> Vec<ItemTax> {
        recompute_all_totals(
            self.items.as_slice(),
            self.taxes.as_slice(),
            self.item_taxes.as_slice(),
        )
    }

    /// Runs the cascade over the stored associations.
    ///
    /// Every Item/Tax mutation already calls this; it is idempotent.
    /// Returns how many associations resolved.
    pub fn recalculate_totals(&mut self) -> usize {
        cascade_totals(
            self.items.as_slice(),
            self.taxes.as_slice(),
            self.item_taxes.as_mut_slice(),
        )
    }

    // =========================================================================
    // Reducer
    // =========================================================================

    /// Applies a reducer action.
    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.kind(), "Dispatching action");
        match action {
            Action::UpdateItem { id, updates } => self.update_item(id, &updates),
            Action::UpdateTax { id, updates } => self.update_tax(id, &updates),
            Action::UpdateItemTax { id, updates } => self.update_item_tax(id, &updates),
            Action::AddItem => {
                self.add_item();
            }
            Action::AddTax => {
                self.add_tax();
            }
            Action::AddItemTax => {
                self.add_item_tax();
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
