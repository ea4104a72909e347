//! # Ledger Commands
//!
//! Whole-ledger reads, the reducer entry point and session reset.

use ledger_core::{Action, Ledger};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, LedgerSnapshot, LedgerState};

/// Gets the current ledger with fresh totals.
pub fn get_ledger(ledger: &LedgerState) -> LedgerSnapshot {
    debug!("get_ledger command");
    ledger.snapshot()
}

/// Applies a reducer action in its JSON form.
///
/// ## Arguments
/// * `action` - `{ "type": "UPDATE_ITEM", "payload": { "id": 1, "updates": {...} } }`
///   or one of the payload-free `ADD_*` actions
///
/// ## Returns
/// Updated ledger, `INVALID_ACTION` for an unknown type, or
/// `VALIDATION_ERROR` for a malformed payload
pub fn dispatch_action(ledger: &LedgerState, action: &Value) -> Result<LedgerSnapshot, ApiError> {
    let action = Action::from_json(action)?;
    debug!(action = action.kind(), "dispatch_action command");

    Ok(ledger.mutate(|l| l.dispatch(action)))
}

/// Throws away the session and starts over.
///
/// Starts from the demo ledger when `seed_demo_data` is set, empty otherwise.
pub fn reset_ledger(ledger: &LedgerState, config: &ConfigState) -> LedgerSnapshot {
    info!(seed_demo_data = config.seed_demo_data, "reset_ledger command");
    ledger.reset(initial_ledger(config))
}

/// The ledger a new session starts from.
pub fn initial_ledger(config: &ConfigState) -> Ledger {
    if config.seed_demo_data {
        Ledger::demo()
    } else {
        Ledger::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_dispatch_update_item() {
        let ledger = LedgerState::new(Ledger::demo());

        let snapshot = dispatch_action(
            &ledger,
            &json!({ "type": "UPDATE_ITEM", "payload": { "id": 1, "updates": { "rate": 20 } } }),
        )
        .unwrap();

        assert_eq!(snapshot.items[0].amount, 40.0);
        assert_eq!(snapshot.item_taxes[0].total, 7.2);
        assert_eq!(snapshot.revision, 1);
    }

    #[test]
    fn test_dispatch_unknown_type() {
        let ledger = LedgerState::default();

        let err = dispatch_action(&ledger, &json!({ "type": "REMOVE_ITEM" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAction);
        assert_eq!(get_ledger(&ledger).revision, 0);
    }

    #[test]
    fn test_dispatch_missing_payload() {
        let ledger = LedgerState::default();

        let err = dispatch_action(&ledger, &json!({ "type": "UPDATE_TAX" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_reset_respects_seed_flag() {
        let ledger = LedgerState::default();
        dispatch_action(&ledger, &json!({ "type": "ADD_ITEM" })).unwrap();

        let empty = reset_ledger(&ledger, &ConfigState::default());
        assert!(empty.items.is_empty());

        let seeded = ConfigState {
            seed_demo_data: true,
            ..ConfigState::default()
        };
        let demo = reset_ledger(&ledger, &seeded);
        assert_eq!(demo.items.len(), 2);
        assert_eq!(demo.item_taxes[1].total, 5.0);
    }
}
