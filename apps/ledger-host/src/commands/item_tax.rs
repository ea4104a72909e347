//! # Item Tax Commands
//!
//! Edits to the association table plus the rows it renders.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ITEM TAXES                                                             │
//! │  ┌────┬──────────────┬──────────────┬──────────────┐                    │
//! │  │ #  │ Item ▾       │ Tax ▾        │ Total        │                    │
//! │  ├────┼──────────────┼──────────────┼──────────────┤                    │
//! │  │ 1  │ Pen          │ GST          │ 3.60         │                    │
//! │  │ 2  │ Book         │ CESS         │ 5.00         │                    │
//! │  └────┴──────────────┴──────────────┴──────────────┘                    │
//! │                                                                         │
//! │  Picking a new Item/Tax recomputes that row's total immediately.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ledger_core::validation::coerce_id;
use ledger_core::{ItemId, ItemTaxId, ItemTaxPatch, TaxId};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, LedgerSnapshot, LedgerState};

/// One rendered row of the association table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTaxRow {
    pub id: ItemTaxId,
    pub item_id: ItemId,
    pub tax_id: TaxId,

    /// Label of the referenced item, or `Item {id}` if it dangles
    pub item_label: String,

    /// Label of the referenced tax, or `Tax {id}` if it dangles
    pub tax_label: String,

    /// Fresh total
    pub total: f64,

    /// `total` formatted per [`ConfigState::format_amount`]
    pub formatted_total: String,
}

/// Appends an association pointing at the first item and first tax.
pub fn add_item_tax(ledger: &LedgerState) -> LedgerSnapshot {
    debug!("add_item_tax command");
    ledger.mutate(|l| {
        l.add_item_tax();
    })
}

/// Merges a JSON patch (`itemId`, `taxId`, `total`) into an association.
pub fn update_item_tax(
    ledger: &LedgerState,
    id: ItemTaxId,
    updates: &Value,
) -> Result<LedgerSnapshot, ApiError> {
    debug!(%id, %updates, "update_item_tax command");

    let patch = ItemTaxPatch::from_json(updates)?;
    Ok(ledger.mutate(|l| l.update_item_tax(id, &patch)))
}

/// Replaces both references of an association.
///
/// The references come straight from the select widgets, so strings like
/// `"2"` are accepted; anything unparseable becomes id 0 and dangles.
pub fn update_item_tax_references(
    ledger: &LedgerState,
    id: ItemTaxId,
    item_id: &Value,
    tax_id: &Value,
) -> LedgerSnapshot {
    let item_id = ItemId(coerce_id(item_id));
    let tax_id = TaxId(coerce_id(tax_id));
    debug!(%id, %item_id, %tax_id, "update_item_tax_references command");

    ledger.mutate(|l| l.update_item_tax_references(id, item_id, tax_id))
}

/// Rows for the association table, with labels and formatted totals.
pub fn get_item_tax_rows(ledger: &LedgerState, config: &ConfigState) -> Vec<ItemTaxRow> {
    debug!("get_item_tax_rows command");

    ledger.with_session(|s| {
        s.ledger
            .read_all_associations_with_fresh_totals()
            .into_iter()
            .map(|link| ItemTaxRow {
                id: link.id,
                item_id: link.item_id,
                tax_id: link.tax_id,
                item_label: s
                    .ledger
                    .item(link.item_id)
                    .map_or_else(|| format!("Item {}", link.item_id), |item| item.label()),
                tax_label: s
                    .ledger
                    .tax(link.tax_id)
                    .map_or_else(|| format!("Tax {}", link.tax_id), |tax| tax.label()),
                total: link.total,
                formatted_total: config.format_amount(link.total),
            })
            .collect()
    })
}
