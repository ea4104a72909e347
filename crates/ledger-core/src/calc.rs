//! # Calculators
//!
//! The two pure functions that produce derived values, plus the rounding
//! they share with the display layer.
//!
//! ## Derived Values
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Where Derived Values Come From                  │
//! │                                                                         │
//! │  Item.quantity ──┐                                                      │
//! │                  ├──► compute_amount ──► Item.amount ──┐                │
//! │  Item.rate ──────┘                                     │                │
//! │                                                        ├──► compute_tax │
//! │  Tax.tax_type ─────────────────────────────────────────┤        │       │
//! │  Tax.charge ───────────────────────────────────────────┘        ▼       │
//! │                                                           ItemTax.total │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Only percentage taxes are rounded, and only to 2 decimals. Rounding is
//! decimal, not binary: the value is written out in fixed notation with
//! [`to_fixed`] and parsed back. A float like `2.005` is really
//! `2.00499999999999989…`, so it becomes `2.0`, while an exact tie such as
//! `0.125` goes away from zero to `0.13`.
//!
//! ```rust
//! use ledger_core::calc::{round2, to_fixed};
//!
//! assert_eq!(round2(2.005), 2.0);
//! assert_eq!(round2(0.125), 0.13);
//! assert_eq!(to_fixed(7.2, 2), "7.20");
//! ```

use crate::types::{Item, Tax, TaxType};

/// Every finite `f64` has an exact decimal expansion with at most this many
/// fractional digits (the smallest subnormal needs all of them).
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Beyond this magnitude fixed notation is not used; the value is rendered
/// with its shortest representation instead.
const FIXED_NOTATION_LIMIT: f64 = 1e21;

/// Largest fraction length `to_fixed` accepts.
pub const MAX_FRACTION_DIGITS: usize = 100;

// =============================================================================
// Amount Calculator
// =============================================================================

/// Line total for an item: `quantity × rate`.
///
/// No rounding and no validation; zero and negative inputs pass through.
///
/// ```rust
/// use ledger_core::calc::compute_amount;
///
/// assert_eq!(compute_amount(2.0, 10.0), 20.0);
/// assert_eq!(compute_amount(-1.0, 3.5), -3.5);
/// ```
#[inline]
pub fn compute_amount(quantity: f64, rate: f64) -> f64 {
    quantity * rate
}

// =============================================================================
// Tax Total Calculator
// =============================================================================

/// Tax owed by `item` under `tax`.
///
/// - `Percentage`: `round2(item.amount × charge / 100)`
/// - `Amount`: `charge`, passed through without rounding
///
/// The caller resolves both references first; this never fails.
///
/// ```rust
/// use ledger_core::calc::compute_tax;
/// use ledger_core::{Item, ItemId, Tax, TaxId, TaxType};
///
/// let mut item = Item::new(ItemId(1));
/// item.amount = 20.0;
/// let mut tax = Tax::new(TaxId(1));
/// tax.charge = 18.0;
/// assert_eq!(compute_tax(&item, &tax), 3.6);
///
/// tax.tax_type = TaxType::Amount;
/// tax.charge = 5.005;
/// assert_eq!(compute_tax(&item, &tax), 5.005);
/// ```
pub fn compute_tax(item: &Item, tax: &Tax) -> f64 {
    match tax.tax_type {
        TaxType::Percentage => round2(item.amount * tax.charge / 100.0),
        TaxType::Amount => tax.charge,
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to 2 decimals by formatting with [`to_fixed`] and parsing back.
///
/// Non-finite values and magnitudes of `1e21` and above come back unchanged,
/// which is what the format-and-parse round trip yields for them.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= FIXED_NOTATION_LIMIT {
        return value;
    }

    to_fixed(value, crate::TOTAL_DECIMALS)
        .parse()
        .unwrap_or(value)
}

/// Formats `value` in fixed notation with exactly `digits` fractional digits.
///
/// ## Rules
/// - The decision is made on the exact decimal value of the float.
/// - Halfway cases round away from zero.
/// - Negative values (including ones that round to zero) keep their `-`.
/// - `NaN`, infinities and magnitudes of `1e21` or more are not written in
///   fixed notation.
/// - `digits` is capped at [`MAX_FRACTION_DIGITS`].
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() >= FIXED_NOTATION_LIMIT {
        return format!("{}", value);
    }

    let digits = digits.min(MAX_FRACTION_DIGITS);
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    // Kept digits, most significant first, with the decision digit after them
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .map(|b| b - b'0')
        .collect();
    let next = frac_part.as_bytes().get(digits).map_or(0, |b| b - b'0');

    if next >= 5 {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    for (index, digit) in kept.iter().enumerate() {
        if index == split {
            out.push('.');
        }
        out.push(char::from(b'0' + digit));
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemId, TaxId};

    fn item_with_amount(amount: f64) -> Item {
        let mut item = Item::new(ItemId(1));
        item.amount = amount;
        item
    }

    fn tax_of(tax_type: TaxType, charge: f64) -> Tax {
        let mut tax = Tax::new(TaxId(1));
        tax.tax_type = tax_type;
        tax.charge = charge;
        tax
    }

    #[test]
    fn test_compute_amount() {
        assert_eq!(compute_amount(2.0, 10.0), 20.0);
        assert_eq!(compute_amount(0.0, 99.0), 0.0);
        assert_eq!(compute_amount(1.5, 0.1), 1.5 * 0.1);
    }

    #[test]
    fn test_percentage_tax_is_rounded() {
        let item = item_with_amount(20.0);
        assert_eq!(compute_tax(&item, &tax_of(TaxType::Percentage, 18.0)), 3.6);

        let item = item_with_amount(10.0);
        // 10 × 8.25% = 0.825, stored as 0.82499… → 0.82
        assert_eq!(compute_tax(&item, &tax_of(TaxType::Percentage, 8.25)), 0.82);
    }

    #[test]
    fn test_amount_tax_passes_through() {
        let item = item_with_amount(1000.0);
        assert_eq!(compute_tax(&item, &tax_of(TaxType::Amount, 5.0)), 5.0);
        assert_eq!(compute_tax(&item, &tax_of(TaxType::Amount, 0.333)), 0.333);
    }

    #[test]
    fn test_round2_uses_exact_decimal_value() {
        assert_eq!(round2(2.005), 2.0);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(9.995), 9.99);
        assert_eq!(round2(3.6000000000000005), 3.6);
    }

    #[test]
    fn test_round2_ties_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn test_round2_non_finite_and_huge() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
        assert_eq!(round2(1e22), 1e22);
    }

    #[test]
    fn test_to_fixed_formatting() {
        assert_eq!(to_fixed(7.2, 2), "7.20");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(9.996, 2), "10.00");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(1.45, 1), "1.4");
        assert_eq!(to_fixed(-1234.5678, 2), "-1234.57");
    }

    #[test]
    fn test_to_fixed_negative_zero_results() {
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(-0.0, 2), "0.00");
    }

    #[test]
    fn test_to_fixed_special_values() {
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 2), "-Infinity");
    }
}
