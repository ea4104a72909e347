//! # Validation Module
//!
//! Turns loosely typed host values into engine inputs.
//!
//! ## Coercion Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Coercion Layers                                    │
//! │                                                                         │
//! │  Layer 1: Presentation layer                                           │
//! │  └── Form inputs produce strings, numbers or null                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Numbers  → f64, anything unparsable → 0 (never an error)          │
//! │  ├── Ids      → u32, anything unusable   → 0 (never matches a row)     │
//! │  ├── Text     → String, null → ""                                      │
//! │  └── Enums    → TaxType / TaxOn, unknown strings → ValidationError     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Recalculation engine (assumes well-typed input)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ledger_core::validation::{coerce_id, coerce_number};
//! use serde_json::json;
//!
//! assert_eq!(coerce_number(&json!("12.5kg")), 12.5);
//! assert_eq!(coerce_number(&json!("abc")), 0.0);
//! assert_eq!(coerce_id(&json!("2")), 2);
//! ```

use std::str::FromStr;

use serde_json::Value;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces a host value to a finite number.
///
/// ## Rules
/// - JSON numbers pass through
/// - Strings are read by their leading numeric prefix (`"12px"` → `12`)
/// - Everything else, and any non-finite result, becomes `0`
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Coerces a host value to an entity id.
///
/// ## Rules
/// - Numbers truncate toward zero (`2.9` → `2`)
/// - Strings are read by their leading integer prefix (`"3rd"` → `3`)
/// - Negative, non-numeric or out-of-range values become `0`, an id no
///   collection ever assigns, so the reference simply dangles
pub fn coerce_id(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(f64::trunc),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() && n >= 0.0 && n <= u32::MAX as f64 => n as u32,
        _ => 0,
    }
}

/// Coerces a host value to display text.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Enum Validation
// =============================================================================

/// Parses an enum field from a string value.
///
/// Enums come from fixed pickers, so an unknown value is a malformed payload
/// rather than something to coerce.
pub fn parse_choice<T>(field: &str, value: &Value) -> ValidationResult<T>
where
    T: FromStr<Err = ValidationError>,
{
    match value {
        Value::String(s) => s.parse(),
        other => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}

// =============================================================================
// Prefix Parsers
// =============================================================================

/// Longest leading decimal literal of `input`, parsed as f64.
///
/// Grammar: `ws* [+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
/// or `ws* [+-]? Infinity`.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Longest leading integer literal of `input`, as f64 so that overflow is
/// visible to the caller.
fn parse_int_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// =============================================================================
// Unit Tests
// =============================================================================
