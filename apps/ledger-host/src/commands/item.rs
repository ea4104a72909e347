//! # Item Commands

use ledger_core::{ItemId, ItemPatch, SelectOption};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{LedgerSnapshot, LedgerState};

/// Appends an item with default fields.
pub fn add_item(ledger: &LedgerState) -> LedgerSnapshot {
    debug!("add_item command");
    ledger.mutate(|l| {
        l.add_item();
    })
}

/// Merges a JSON patch into an item.
///
/// ## Arguments
/// * `id` - Item to edit (unknown ids are a no-op)
/// * `updates` - Object with any of `product`, `quantity`, `rate`
///
/// ## Returns
/// Updated ledger, or a validation error if `updates` is not an object
pub fn update_item(
    ledger: &LedgerState,
    id: ItemId,
    updates: &Value,
) -> Result<LedgerSnapshot, ApiError> {
    debug!(%id, %updates, "update_item command");

    let patch = ItemPatch::from_json(updates)?;
    Ok(ledger.mutate(|l| l.update_item(id, &patch)))
}

/// Options for the item select of the association table.
pub fn get_item_options(ledger: &LedgerState) -> Vec<SelectOption> {
    debug!("get_item_options command");
    ledger.with_session(|s| s.ledger.item_options())
}
