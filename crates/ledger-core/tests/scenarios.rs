//! End-to-end walkthroughs of the Mutation API.

use ledger_core::{
    Action, ItemId, ItemPatch, ItemTaxId, ItemTaxPatch, Ledger, TaxId, TaxPatch, TaxType,
};
use serde_json::json;

/// Ledger with one item (2 × 10) and one tax of the given kind, linked.
fn single_link(tax_type: TaxType, charge: f64) -> (Ledger, ItemId, TaxId, ItemTaxId) {
    let mut ledger = Ledger::new();

    let item = ledger.add_item().id;
    ledger.update_item(item, &ItemPatch::new().quantity(2.0).rate(10.0));

    let tax = ledger.add_tax().id;
    ledger.update_tax(tax, &TaxPatch::new().tax_type(tax_type).charge(charge));

    let link = ledger.add_item_tax().id;
    ledger.update_item_tax_references(link, item, tax);

    (ledger, item, tax, link)
}

#[test]
fn percentage_tax_on_item() {
    let (ledger, item, _, _) = single_link(TaxType::Percentage, 18.0);

    assert_eq!(ledger.item(item).unwrap().amount, 20.0);
    let totals = ledger.read_all_associations_with_fresh_totals();
    assert_eq!(totals[0].total, 3.6);
}

#[test]
fn flat_amount_tax_is_not_rounded() {
    let (mut ledger, _, tax, link) = single_link(TaxType::Amount, 5.0);
    assert_eq!(ledger.item_tax(link).unwrap().total, 5.0);

    ledger.update_tax(tax, &TaxPatch::new().charge(5.005));
    assert_eq!(ledger.item_tax(link).unwrap().total, 5.005);
}

#[test]
fn rate_change_cascades_to_totals() {
    let (mut ledger, item, _, link) = single_link(TaxType::Percentage, 18.0);

    ledger.update_item(item, &ItemPatch::new().rate(20.0));

    assert_eq!(ledger.item(item).unwrap().amount, 40.0);
    assert_eq!(ledger.item_tax(link).unwrap().total, 7.2);
    assert_eq!(ledger.read_all_associations_with_fresh_totals()[0].total, 7.2);
}

#[test]
fn add_item_tax_on_empty_ledger() {
    let mut ledger = Ledger::new();
    let link = ledger.add_item_tax();

    assert_eq!(link.item_id, ItemId(1));
    assert_eq!(link.tax_id, TaxId(1));
    assert_eq!(link.total, 0.0);
}

#[test]
fn ids_grow_from_the_max() {
    let mut ledger = Ledger::new();
    assert_eq!(ledger.add_item().id, ItemId(1));
    assert_eq!(ledger.add_item().id, ItemId(2));
    assert_eq!(ledger.add_item().id, ItemId(3));
    assert_eq!(ledger.add_item().id, ItemId(4));

    // Collections are counted separately
    assert_eq!(ledger.add_tax().id, TaxId(1));
    assert_eq!(ledger.add_item_tax().id, ItemTaxId(1));
}

#[test]
fn dangling_reference_keeps_last_total() {
    let (mut ledger, item, tax, link) = single_link(TaxType::Percentage, 18.0);
    assert_eq!(ledger.item_tax(link).unwrap().total, 3.6);

    ledger.update_item_tax_references(link, ItemId(99), tax);
    assert_eq!(ledger.item_tax(link).unwrap().total, 3.6);

    // Upstream edits no longer reach it
    ledger.update_item(item, &ItemPatch::new().rate(1000.0));
    ledger.update_tax(tax, &TaxPatch::new().charge(50.0));
    assert_eq!(ledger.read_all_associations_with_fresh_totals()[0].total, 3.6);

    // Pointing back picks up the current values
    ledger.update_item_tax_references(link, item, tax);
    assert_eq!(ledger.item_tax(link).unwrap().total, 1000.0);
}

#[test]
fn reference_change_recomputes_immediately() {
    let mut ledger = Ledger::demo();

    // Book (100) under GST (18%)
    ledger.update_item_tax(ItemTaxId(2), &ItemTaxPatch::new().tax_id(TaxId(1)));

    assert_eq!(ledger.item_tax(ItemTaxId(2)).unwrap().total, 18.0);
    assert_eq!(
        ledger.item_taxes(),
        ledger.read_all_associations_with_fresh_totals().as_slice()
    );
}

#[test]
fn stored_totals_match_fresh_read_after_every_edit() {
    let mut ledger = Ledger::demo();
    let edits = [
        json!({ "type": "UPDATE_ITEM", "payload": { "id": 1, "updates": { "quantity": "3" } } }),
        json!({ "type": "UPDATE_TAX", "payload": { "id": 1, "updates": { "charge": 12.5 } } }),
        json!({ "type": "ADD_ITEM" }),
        json!({ "type": "ADD_ITEM_TAX" }),
        json!({ "type": "UPDATE_ITEM_TAX", "payload": { "id": 3, "updates": { "itemId": "3" } } }),
        json!({ "type": "UPDATE_ITEM", "payload": { "id": 3, "updates": { "rate": "abc" } } }),
        json!({ "type": "UPDATE_TAX", "payload": { "id": 2, "updates": { "type": "Percentage" } } }),
    ];

    for edit in &edits {
        ledger.dispatch(Action::from_json(edit).unwrap());
        assert_eq!(
            ledger.item_taxes(),
            ledger.read_all_associations_with_fresh_totals().as_slice()
        );
    }

    // Pen 3 × 10 under 12.5% = 3.75
    assert_eq!(ledger.item_tax(ItemTaxId(1)).unwrap().total, 3.75);
    // Book 100 under CESS now 5% = 5.00
    assert_eq!(ledger.item_tax(ItemTaxId(2)).unwrap().total, 5.0);
    // New item has rate "abc" → 0
    assert_eq!(ledger.item(ItemId(3)).unwrap().rate, 0.0);
    assert_eq!(ledger.item_tax(ItemTaxId(3)).unwrap().total, 0.0);
}
