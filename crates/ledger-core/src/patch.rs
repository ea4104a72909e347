//! # Partial Updates
//!
//! Every update carries, per field, either "leave alone" or "set to".
//!
//! ## Why Not `Option`?
//! The engine cares whether a field was *sent*, not whether its value
//! changed: `{ quantity: 2 }` on an item whose quantity is already 2 still
//! recomputes the amount. [`Field`] makes that explicit.
//!
//! ```text
//! { "quantity": 2 }          ItemPatch { quantity: Set(2.0), rate: Unset, .. }
//!        │                            │
//!        ▼                            ▼
//!  ItemPatch::from_json ───►  touches_amount_inputs() == true ──► Rule A
//! ```
//!
//! ## Read-Only Keys
//! `id` on any patch and `amount` on item patches are dropped: identifiers are
//! assigned by the store and `amount` is derived. `total` on an association
//! patch is accepted, but the next recalculation overwrites it whenever both
//! references resolve.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ValidationError;
use crate::types::{Item, ItemId, ItemTax, Tax, TaxId, TaxOn, TaxType};
use crate::validation::{coerce_id, coerce_number, coerce_text, parse_choice, ValidationResult};

// =============================================================================
// Field
// =============================================================================

/// One field of a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Not part of the update.
    Unset,
    /// Replace the current value.
    Set(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<T> Field<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Field::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            Field::Unset => None,
        }
    }
}

impl<T: Clone> Field<T> {
    /// Writes the value into `target` if set.
    fn write_to(&self, target: &mut T) {
        if let Field::Set(value) = self {
            *target = value.clone();
        }
    }
}

// =============================================================================
// Item Patch
// =============================================================================

/// Partial update of an [`Item`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub product: Field<String>,
    pub quantity: Field<f64>,
    pub rate: Field<f64>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Field::Set(product.into());
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Field::Set(quantity);
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Field::Set(rate);
        self
    }

    /// True if the update sends `quantity` or `rate`.
    pub fn touches_amount_inputs(&self) -> bool {
        self.quantity.is_set() || self.rate.is_set()
    }

    /// Builds a patch from a JSON object such as `{"rate": "20"}`.
    pub fn from_json(updates: &Value) -> ValidationResult<Self> {
        let mut patch = ItemPatch::new();
        for (key, value) in as_object(updates)? {
            match key.as_str() {
                "product" => patch.product = Field::Set(coerce_text(value)),
                "quantity" => patch.quantity = Field::Set(coerce_number(value)),
                "rate" => patch.rate = Field::Set(coerce_number(value)),
                other => ignore_key("item", other),
            }
        }
        Ok(patch)
    }

    /// Merges the set fields into `item`. Does not touch `amount`.
    pub(crate) fn apply_to(&self, item: &mut Item) {
        self.product.write_to(&mut item.product);
        self.quantity.write_to(&mut item.quantity);
        self.rate.write_to(&mut item.rate);
    }
}

// =============================================================================
// Tax Patch
// =============================================================================

/// Partial update of a [`Tax`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxPatch {
    pub tax: Field<String>,
    pub tax_type: Field<TaxType>,
    pub tax_on: Field<TaxOn>,
    pub charge: Field<f64>,
}

impl TaxPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tax(mut self, name: impl Into<String>) -> Self {
        self.tax = Field::Set(name.into());
        self
    }

    pub fn tax_type(mut self, tax_type: TaxType) -> Self {
        self.tax_type = Field::Set(tax_type);
        self
    }

    pub fn tax_on(mut self, tax_on: TaxOn) -> Self {
        self.tax_on = Field::Set(tax_on);
        self
    }

    pub fn charge(mut self, charge: f64) -> Self {
        self.charge = Field::Set(charge);
        self
    }

    /// Builds a patch from a JSON object such as `{"type": "Amount"}`.
    ///
    /// Fails only when `type`/`taxOn` hold a value outside their pickers.
    pub fn from_json(updates: &Value) -> ValidationResult<Self> {
        let mut patch = TaxPatch::new();
        for (key, value) in as_object(updates)? {
            match key.as_str() {
                "tax" => patch.tax = Field::Set(coerce_text(value)),
                "type" => patch.tax_type = Field::Set(parse_choice("type", value)?),
                "taxOn" => patch.tax_on = Field::Set(parse_choice("taxOn", value)?),
                "charge" => patch.charge = Field::Set(coerce_number(value)),
                other => ignore_key("tax", other),
            }
        }
        Ok(patch)
    }

    pub(crate) fn apply_to(&self, tax: &mut Tax) {
        self.tax.write_to(&mut tax.tax);
        self.tax_type.write_to(&mut tax.tax_type);
        self.tax_on.write_to(&mut tax.tax_on);
        self.charge.write_to(&mut tax.charge);
    }
}

// =============================================================================
// Item Tax Patch
// =============================================================================

/// Partial update of an [`ItemTax`] association.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemTaxPatch {
    pub item_id: Field<ItemId>,
    pub tax_id: Field<TaxId>,
    pub total: Field<f64>,
}

impl ItemTaxPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch replacing both references, as the association table's pickers do.
    pub fn references(item_id: ItemId, tax_id: TaxId) -> Self {
        ItemTaxPatch {
            item_id: Field::Set(item_id),
            tax_id: Field::Set(tax_id),
            total: Field::Unset,
        }
    }

    pub fn item_id(mut self, item_id: ItemId) -> Self {
        self.item_id = Field::Set(item_id);
        self
    }

    pub fn tax_id(mut self, tax_id: TaxId) -> Self {
        self.tax_id = Field::Set(tax_id);
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total = Field::Set(total);
        self
    }

    /// Builds a patch from a JSON object such as `{"itemId": "2"}`.
    pub fn from_json(updates: &Value) -> ValidationResult<Self> {
        let mut patch = ItemTaxPatch::new();
        for (key, value) in as_object(updates)? {
            match key.as_str() {
                "itemId" => patch.item_id = Field::Set(ItemId(coerce_id(value))),
                "taxId" => patch.tax_id = Field::Set(TaxId(coerce_id(value))),
                "total" => patch.total = Field::Set(coerce_number(value)),
                other => ignore_key("item tax", other),
            }
        }
        Ok(patch)
    }

    pub(crate) fn apply_to(&self, item_tax: &mut ItemTax) {
        self.item_id.write_to(&mut item_tax.item_id);
        self.tax_id.write_to(&mut item_tax.tax_id);
        self.total.write_to(&mut item_tax.total);
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn as_object(updates: &Value) -> ValidationResult<&Map<String, Value>> {
    updates
        .as_object()
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "updates".to_string(),
            reason: "expected an object".to_string(),
        })
}

fn ignore_key(entity: &str, key: &str) {
    debug!(entity, key, "Ignoring field that is read-only or unknown");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_patch_presence_not_equality() {
        let patch = ItemPatch::from_json(&json!({ "quantity": 1 })).unwrap();
        assert!(patch.touches_amount_inputs());

        let patch = ItemPatch::from_json(&json!({ "product": "Pen" })).unwrap();
        assert!(!patch.touches_amount_inputs());
        assert_eq!(patch.product, Field::Set("Pen".to_string()));
    }

    #[test]
    fn test_item_patch_drops_read_only_keys() {
        let patch = ItemPatch::from_json(&json!({ "id": 9, "amount": 500 })).unwrap();
        assert_eq!(patch, ItemPatch::new());
    }

    #[test]
    fn test_item_patch_coerces_numbers() {
        let patch = ItemPatch::from_json(&json!({ "quantity": "abc", "rate": "12.5" })).unwrap();
        assert_eq!(patch.quantity, Field::Set(0.0));
        assert_eq!(patch.rate, Field::Set(12.5));
    }

    #[test]
    fn test_patch_must_be_object() {
        assert!(ItemPatch::from_json(&json!([1, 2])).is_err());
        assert!(TaxPatch::from_json(&json!("type")).is_err());
        assert!(ItemTaxPatch::from_json(&json!(null)).is_err());
    }

    #[test]
    fn test_tax_patch_enums() {
        let patch = TaxPatch::from_json(&json!({ "type": "Amount", "taxOn": "On Order" })).unwrap();
        assert_eq!(patch.tax_type, Field::Set(TaxType::Amount));
        assert_eq!(patch.tax_on, Field::Set(TaxOn::OnOrder));

        assert!(TaxPatch::from_json(&json!({ "type": "Compound" })).is_err());
    }

    #[test]
    fn test_item_tax_patch_parses_string_ids() {
        let patch = ItemTaxPatch::from_json(&json!({ "itemId": "2", "taxId": 1 })).unwrap();
        assert_eq!(patch, ItemTaxPatch::references(ItemId(2), TaxId(1)));
    }

    #[test]
    fn test_apply_only_writes_set_fields() {
        let mut item = Item::new(ItemId(1));
        item.product = "Pen".to_string();
        ItemPatch::new().rate(10.0).apply_to(&mut item);
        assert_eq!(item.product, "Pen");
        assert_eq!(item.rate, 10.0);
        assert_eq!(item.amount, 0.0);
    }
}
