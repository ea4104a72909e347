//! # Domain Types
//!
//! Core domain types used throughout the ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │       Tax       │   │     ItemTax     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │◄──┼─────────────────┼───│  item_id (FK)   │       │
//! │  │  product        │   │  id (TaxId)     │◄──│  tax_id  (FK)   │       │
//! │  │  quantity       │   │  tax (name)     │   │  total ★        │       │
//! │  │  rate           │   │  tax_type       │   └─────────────────┘       │
//! │  │  amount ★       │   │  tax_on         │                              │
//! │  └─────────────────┘   │  charge         │   ★ = derived field          │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//! Each collection has its own id type. Ids are small integers assigned by
//! the [`Table`](crate::store::Table) that owns the collection; they are
//! only unique within that collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::store::{Entity, EntityId};

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of an [`Item`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ItemId(pub u32);

/// Identifier of a [`Tax`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct TaxId(pub u32);

/// Identifier of an [`ItemTax`] association.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ItemTaxId(pub u32);

impl EntityId for ItemId {
    fn from_raw(raw: u32) -> Self {
        ItemId(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl EntityId for TaxId {
    fn from_raw(raw: u32) -> Self {
        TaxId(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl EntityId for ItemTaxId {
    fn from_raw(raw: u32) -> Self {
        ItemTaxId(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemTaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Item
// =============================================================================

/// A purchasable line entry.
///
/// `amount` is derived: it equals `quantity * rate` after every update that
/// touches either input. It is never written from outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    pub id: ItemId,

    /// Product name shown in the item table and selection lists.
    pub product: String,

    pub quantity: f64,

    /// Unit rate.
    pub rate: f64,

    /// Line total (`quantity × rate`). Derived.
    pub amount: f64,
}

impl Item {
    /// Creates an item with the defaults used by "add item".
    pub fn new(id: ItemId) -> Self {
        Item {
            id,
            product: String::new(),
            quantity: crate::DEFAULT_QUANTITY,
            rate: 0.0,
            amount: 0.0,
        }
    }

    /// Label used in selection lists: the product name, or `Item {id}` when
    /// the name is empty.
    pub fn label(&self) -> String {
        if self.product.is_empty() {
            format!("Item {}", self.id)
        } else {
            self.product.clone()
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

// =============================================================================
// Tax Type
// =============================================================================

/// How a tax charge is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TaxType {
    /// `charge` is a percentage of the item amount.
    #[default]
    Percentage,
    /// `charge` is a flat amount owed as-is.
    Amount,
}

impl TaxType {
    pub const ALLOWED: [&'static str; 2] = ["Percentage", "Amount"];
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxType::Percentage => write!(f, "Percentage"),
            TaxType::Amount => write!(f, "Amount"),
        }
    }
}

impl FromStr for TaxType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" | "percent" | "%" => Ok(TaxType::Percentage),
            "amount" | "flat" => Ok(TaxType::Amount),
            _ => Err(ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: TaxType::ALLOWED.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Tax Scope
// =============================================================================

/// What a tax is levied on.
///
/// Stored and editable, but no calculation reads it: every association is
/// computed against its item regardless of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TaxOn {
    #[default]
    #[serde(rename = "On Item")]
    OnItem,
    #[serde(rename = "On Order")]
    OnOrder,
}

impl TaxOn {
    pub const ALLOWED: [&'static str; 2] = ["On Item", "On Order"];
}

impl fmt::Display for TaxOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxOn::OnItem => write!(f, "On Item"),
            TaxOn::OnOrder => write!(f, "On Order"),
        }
    }
}

impl FromStr for TaxOn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on item" | "onitem" | "on_item" | "item" => Ok(TaxOn::OnItem),
            "on order" | "onorder" | "on_order" | "order" => Ok(TaxOn::OnOrder),
            _ => Err(ValidationError::NotAllowed {
                field: "taxOn".to_string(),
                allowed: TaxOn::ALLOWED.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Tax
// =============================================================================

/// A named tax rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Tax {
    pub id: TaxId,

    /// Display name (e.g. "GST").
    pub tax: String,

    #[serde(rename = "type")]
    pub tax_type: TaxType,

    pub tax_on: TaxOn,

    /// Percentage or flat amount depending on `tax_type`.
    pub charge: f64,
}

impl Tax {
    /// Creates a tax with the defaults used by "add tax".
    pub fn new(id: TaxId) -> Self {
        Tax {
            id,
            tax: String::new(),
            tax_type: TaxType::default(),
            tax_on: TaxOn::default(),
            charge: 0.0,
        }
    }

    /// Label used in selection lists.
    pub fn label(&self) -> String {
        if self.tax.is_empty() {
            format!("Tax {}", self.id)
        } else {
            self.tax.clone()
        }
    }
}

impl Entity for Tax {
    type Id = TaxId;

    fn id(&self) -> TaxId {
        self.id
    }
}

// =============================================================================
// Item Tax Association
// =============================================================================

/// Links one [`Item`] to one [`Tax`].
///
/// `total` is derived from the referenced pair whenever both references
/// resolve. If either dangles the last computed value is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemTax {
    pub id: ItemTaxId,
    pub item_id: ItemId,
    pub tax_id: TaxId,
    pub total: f64,
}

impl Entity for ItemTax {
    type Id = ItemTaxId;

    fn id(&self) -> ItemTaxId {
        self.id
    }
}

// =============================================================================
// Selection Options
// =============================================================================

/// An `(id, label)` pair for the item/tax pickers of the association table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectOption {
    pub value: u32,
    pub label: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
