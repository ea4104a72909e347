//! # Reducer Actions
//!
//! The Mutation API as data, so a host can forward whatever the
//! presentation layer dispatches.
//!
//! ## Wire Shape
//! ```text
//! { "type": "UPDATE_ITEM",     "payload": { "id": 1, "updates": { "rate": 20 } } }
//! { "type": "UPDATE_TAX",      "payload": { "id": 2, "updates": { "type": "Amount" } } }
//! { "type": "UPDATE_ITEM_TAX", "payload": { "id": 1, "updates": { "itemId": "2" } } }
//! { "type": "ADD_ITEM" }   { "type": "ADD_TAX" }   { "type": "ADD_ITEM_TAX" }
//! ```

use serde_json::Value;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::patch::{ItemPatch, ItemTaxPatch, TaxPatch};
use crate::types::{ItemId, ItemTaxId, TaxId};
use crate::validation::coerce_id;

/// One reducer step.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UpdateItem { id: ItemId, updates: ItemPatch },
    UpdateTax { id: TaxId, updates: TaxPatch },
    UpdateItemTax { id: ItemTaxId, updates: ItemTaxPatch },
    AddItem,
    AddTax,
    AddItemTax,
}

impl Action {
    /// The `type` tag of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::UpdateItem { .. } => "UPDATE_ITEM",
            Action::UpdateTax { .. } => "UPDATE_TAX",
            Action::UpdateItemTax { .. } => "UPDATE_ITEM_TAX",
            Action::AddItem => "ADD_ITEM",
            Action::AddTax => "ADD_TAX",
            Action::AddItemTax => "ADD_ITEM_TAX",
        }
    }

    /// Parses an action in the wire shape above.
    pub fn from_json(action: &Value) -> CoreResult<Self> {
        let kind = action
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| required("type"))?;

        match kind {
            "ADD_ITEM" => Ok(Action::AddItem),
            "ADD_TAX" => Ok(Action::AddTax),
            "ADD_ITEM_TAX" => Ok(Action::AddItemTax),
            "UPDATE_ITEM" => {
                let (id, updates) = update_payload(action)?;
                Ok(Action::UpdateItem {
                    id: ItemId(id),
                    updates: ItemPatch::from_json(updates)?,
                })
            }
            "UPDATE_TAX" => {
                let (id, updates) = update_payload(action)?;
                Ok(Action::UpdateTax {
                    id: TaxId(id),
                    updates: TaxPatch::from_json(updates)?,
                })
            }
            "UPDATE_ITEM_TAX" => {
                let (id, updates) = update_payload(action)?;
                Ok(Action::UpdateItemTax {
                    id: ItemTaxId(id),
                    updates: ItemTaxPatch::from_json(updates)?,
                })
            }
            other => Err(CoreError::UnknownAction(other.to_string())),
        }
    }
}

fn update_payload(action: &Value) -> CoreResult<(u32, &Value)> {
    let payload = action.get("payload").ok_or_else(|| required("payload"))?;
    let id = payload.get("id").ok_or_else(|| required("payload.id"))?;
    let updates = payload
        .get("updates")
        .ok_or_else(|| required("payload.updates"))?;
    Ok((coerce_id(id), updates))
}

fn required(field: &str) -> CoreError {
    ValidationError::Required {
        field: field.to_string(),
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================
