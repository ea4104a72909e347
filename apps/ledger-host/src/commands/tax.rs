//! # Tax Commands

use ledger_core::{SelectOption, TaxId, TaxPatch};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{LedgerSnapshot, LedgerState};

/// Appends a tax with default fields.
pub fn add_tax(ledger: &LedgerState) -> LedgerSnapshot {
    debug!("add_tax command");
    ledger.mutate(|l| {
        l.add_tax();
    })
}

/// Merges a JSON patch into a tax.
///
/// `updates` may carry `tax`, `type`, `taxOn` and `charge`. An unknown
/// `type` or `taxOn` string is a validation error.
pub fn update_tax(
    ledger: &LedgerState,
    id: TaxId,
    updates: &Value,
) -> Result<LedgerSnapshot, ApiError> {
    debug!(%id, %updates, "update_tax command");

    let patch = TaxPatch::from_json(updates)?;
    Ok(ledger.mutate(|l| l.update_tax(id, &patch)))
}

/// Options for the tax select of the association table.
pub fn get_tax_options(ledger: &LedgerState) -> Vec<SelectOption> {
    debug!("get_tax_options command");
    ledger.with_session(|s| s.ledger.tax_options())
}
