//! Property-based tests for the recalculation engine
//!
//! Random edit sequences are replayed against a ledger and the derived-value
//! invariants are checked after every step. Edits deliberately include ids
//! that do not exist and references that dangle, since those are the cases
//! where a stale or corrupted total would show up.

use ledger_core::calc::{round2, to_fixed};
use ledger_core::engine::recompute_all_totals;
use ledger_core::{
    Action, ItemId, ItemPatch, ItemTaxId, ItemTaxPatch, Ledger, TaxId, TaxOn, TaxPatch, TaxType,
};
use proptest::prelude::*;

/// Money-like values with up to 2 decimals, plus the odd negative.
fn amount_strategy() -> impl Strategy<Value = f64> {
    (-1_000i64..100_000).prop_map(|cents| cents as f64 / 100.0)
}

/// Ids mostly in range, sometimes past the end.
fn id_strategy() -> impl Strategy<Value = u32> {
    0u32..8
}

fn item_patch_strategy() -> impl Strategy<Value = ItemPatch> {
    (
        proptest::option::of("[a-z]{0,6}"),
        proptest::option::of(amount_strategy()),
        proptest::option::of(amount_strategy()),
    )
        .prop_map(|(product, quantity, rate)| {
            let mut patch = ItemPatch::new();
            if let Some(product) = product {
                patch = patch.product(product);
            }
            if let Some(quantity) = quantity {
                patch = patch.quantity(quantity);
            }
            if let Some(rate) = rate {
                patch = patch.rate(rate);
            }
            patch
        })
}

fn tax_patch_strategy() -> impl Strategy<Value = TaxPatch> {
    (
        proptest::option::of(prop_oneof![Just(TaxType::Percentage), Just(TaxType::Amount)]),
        proptest::option::of(prop_oneof![Just(TaxOn::OnItem), Just(TaxOn::OnOrder)]),
        proptest::option::of(0i64..5_000),
    )
        .prop_map(|(tax_type, tax_on, charge)| {
            let mut patch = TaxPatch::new();
            if let Some(tax_type) = tax_type {
                patch = patch.tax_type(tax_type);
            }
            if let Some(tax_on) = tax_on {
                patch = patch.tax_on(tax_on);
            }
            if let Some(charge) = charge {
                patch = patch.charge(charge as f64 / 100.0);
            }
            patch
        })
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::AddItem),
        Just(Action::AddTax),
        Just(Action::AddItemTax),
        (id_strategy(), item_patch_strategy())
            .prop_map(|(id, updates)| Action::UpdateItem { id: ItemId(id), updates }),
        (id_strategy(), tax_patch_strategy())
            .prop_map(|(id, updates)| Action::UpdateTax { id: TaxId(id), updates }),
        (id_strategy(), id_strategy(), id_strategy()).prop_map(|(id, item_id, tax_id)| {
            Action::UpdateItemTax {
                id: ItemTaxId(id),
                updates: ItemTaxPatch::references(ItemId(item_id), TaxId(tax_id)),
            }
        }),
    ]
}

fn action_sequence_strategy() -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(action_strategy(), 0..=30)
}

fn replay(actions: &[Action]) -> Ledger {
    let mut ledger = Ledger::new();
    for action in actions {
        ledger.dispatch(action.clone());
    }
    ledger
}

// PROPERTY TESTS

proptest! {
    /// Property: every item satisfies amount == quantity × rate after every step
    ///
    /// Items are only created with defaults (1 × 0 = 0) and every edit that
    /// sends quantity or rate recomputes, so the invariant holds throughout.
    #[test]
    fn prop_amount_matches_inputs(actions in action_sequence_strategy()) {
        let mut ledger = Ledger::new();
        for action in actions {
            ledger.dispatch(action);
            for item in ledger.items() {
                prop_assert_eq!(item.amount, item.quantity * item.rate);
            }
        }
    }

    /// Property: renaming never touches amount
    #[test]
    fn prop_rename_keeps_amount(
        actions in action_sequence_strategy(),
        name in "[A-Za-z ]{0,12}",
    ) {
        let mut ledger = replay(&actions);
        let before: Vec<f64> = ledger.items().iter().map(|item| item.amount).collect();

        for id in 1..=ledger.items().len() as u32 {
            ledger.update_item(ItemId(id), &ItemPatch::new().product(name.clone()));
        }

        let after: Vec<f64> = ledger.items().iter().map(|item| item.amount).collect();
        prop_assert_eq!(before, after);
    }

    /// Property: stored totals are never stale
    ///
    /// What the Mutation API leaves behind must equal a fresh cascade.
    #[test]
    fn prop_stored_totals_are_fresh(actions in action_sequence_strategy()) {
        let ledger = replay(&actions);
        prop_assert_eq!(
            ledger.item_taxes().to_vec(),
            ledger.read_all_associations_with_fresh_totals()
        );
    }

    /// Property: the cascade is idempotent
    #[test]
    fn prop_cascade_is_idempotent(actions in action_sequence_strategy()) {
        let ledger = replay(&actions);

        let once = recompute_all_totals(ledger.items(), ledger.taxes(), ledger.item_taxes());
        let twice = recompute_all_totals(ledger.items(), ledger.taxes(), &once);
        prop_assert_eq!(once, twice);
    }

    /// Property: cascade order does not matter
    #[test]
    fn prop_cascade_ignores_order(actions in action_sequence_strategy()) {
        let ledger = replay(&actions);

        let forward = recompute_all_totals(ledger.items(), ledger.taxes(), ledger.item_taxes());
        let mut reversed_input = ledger.item_taxes().to_vec();
        reversed_input.reverse();
        let mut backward = recompute_all_totals(ledger.items(), ledger.taxes(), &reversed_input);
        backward.reverse();

        prop_assert_eq!(forward, backward);
    }

    /// Property: dangling associations keep their total through any upstream edit
    #[test]
    fn prop_dangling_total_is_preserved(
        actions in action_sequence_strategy(),
        upstream in prop::collection::vec(
            prop_oneof![
                (id_strategy(), item_patch_strategy())
                    .prop_map(|(id, updates)| Action::UpdateItem { id: ItemId(id), updates }),
                (id_strategy(), tax_patch_strategy())
                    .prop_map(|(id, updates)| Action::UpdateTax { id: TaxId(id), updates }),
            ],
            0..=10,
        ),
    ) {
        let mut ledger = replay(&actions);
        let link = ledger.add_item_tax();
        ledger.update_item_tax_references(link.id, ItemId(0), TaxId(0));
        let parked = ledger.item_tax(link.id).unwrap().total;

        for action in upstream {
            ledger.dispatch(action);
        }

        prop_assert_eq!(ledger.item_tax(link.id).unwrap().total, parked);
    }

    /// Property: new ids are one past the max and never repeat
    #[test]
    fn prop_ids_are_monotonic(actions in action_sequence_strategy()) {
        let ledger = replay(&actions);

        for ids in [
            ledger.items().iter().map(|item| item.id.0).collect::<Vec<_>>(),
            ledger.taxes().iter().map(|tax| tax.id.0).collect::<Vec<_>>(),
            ledger.item_taxes().iter().map(|link| link.id.0).collect::<Vec<_>>(),
        ] {
            let expected: Vec<u32> = (1..=ids.len() as u32).collect();
            prop_assert_eq!(ids, expected);
        }
    }

    /// Property: percentage totals equal round2(amount × charge / 100), flat
    /// totals equal the charge
    #[test]
    fn prop_totals_follow_tax_type(
        quantity in amount_strategy(),
        rate in amount_strategy(),
        charge in 0i64..5_000,
        flat in any::<bool>(),
    ) {
        let charge = charge as f64 / 100.0;
        let tax_type = if flat { TaxType::Amount } else { TaxType::Percentage };

        let mut ledger = Ledger::new();
        let item = ledger.add_item().id;
        ledger.update_item(item, &ItemPatch::new().quantity(quantity).rate(rate));
        let tax = ledger.add_tax().id;
        ledger.update_tax(tax, &TaxPatch::new().tax_type(tax_type).charge(charge));
        let link = ledger.add_item_tax();

        let amount = quantity * rate;
        let expected = match tax_type {
            TaxType::Percentage => round2(amount * charge / 100.0),
            TaxType::Amount => charge,
        };
        prop_assert_eq!(link.total, expected);
    }

    /// Property: round2 is the fixed-notation string parsed back
    #[test]
    fn prop_round2_is_to_fixed_reparsed(value in -1.0e9f64..1.0e9) {
        let reparsed: f64 = to_fixed(value, 2).parse().unwrap();
        prop_assert_eq!(round2(value), reparsed);
        prop_assert!((round2(value) - value).abs() <= 0.005 + 1e-9 * value.abs());
    }
}
