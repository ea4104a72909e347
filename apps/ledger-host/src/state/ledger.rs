//! # Ledger State
//!
//! Owns the single ledger session shared by every command.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>`:
//! 1. Several commands read and modify the same ledger
//! 2. Each Mutation API call must finish (cascade included) before the next
//!    one starts, so a reader never sees a half-propagated edit
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger State Operations                              │
//! │                                                                         │
//! │  Table Edit               Command                 Session Change        │
//! │  ──────────               ───────                 ──────────────        │
//! │                                                                         │
//! │  Edit rate cell ─────────► update_item() ────────► amount, totals      │
//! │                                                                         │
//! │  Change tax type ────────► update_tax() ─────────► totals              │
//! │                                                                         │
//! │  Pick item in row ───────► update_item_tax() ────► one total           │
//! │                                                                         │
//! │  Click "Add" ────────────► add_*() ──────────────► new row             │
//! │                                                                         │
//! │  Render tables ──────────► get_ledger() ─────────► (read only)         │
//! │                                                                         │
//! │  NOTE: every write bumps `revision` so the UI can drop stale renders.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use ledger_core::{Item, ItemTax, Ledger, Tax};
use serde::Serialize;

/// One editing session.
#[derive(Debug, Clone)]
pub struct LedgerSession {
    /// The ledger being edited
    pub ledger: Ledger,

    /// Number of mutations applied since the session opened
    pub revision: u64,

    /// When the session was opened or last reset
    pub opened_at: DateTime<Utc>,
}

impl LedgerSession {
    /// Opens a session over `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        LedgerSession {
            ledger,
            revision: 0,
            opened_at: Utc::now(),
        }
    }
}

/// What the presentation layer renders after every command.
///
/// `item_taxes` always carries fresh totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub items: Vec<Item>,
    pub taxes: Vec<Tax>,
    pub item_taxes: Vec<ItemTax>,
    pub revision: u64,
    pub opened_at: DateTime<Utc>,
}

impl From<&LedgerSession> for LedgerSnapshot {
    fn from(session: &LedgerSession) -> Self {
        LedgerSnapshot {
            items: session.ledger.items().to_vec(),
            taxes: session.ledger.taxes().to_vec(),
            item_taxes: session.ledger.read_all_associations_with_fresh_totals(),
            revision: session.revision,
            opened_at: session.opened_at,
        }
    }
}

/// Shared ledger state.
///
/// ## Why Not RwLock?
/// Nearly every command writes, and each write is a short in-memory cascade.
#[derive(Debug, Clone)]
pub struct LedgerState {
    session: Arc<Mutex<LedgerSession>>,
}

impl LedgerState {
    /// Creates a state holding `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        LedgerState {
            session: Arc::new(Mutex::new(LedgerSession::new(ledger))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// A poisoned lock is recovered: the ledger is only ever mutated through
    /// calls that leave it consistent, so the inner value is still usable.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&LedgerSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the ledger, then bumps the
    /// revision and returns the resulting snapshot.
    ///
    /// ## Usage
    /// ```rust
    /// use ledger_core::{ItemId, ItemPatch, Ledger};
    /// use ledger_host::state::LedgerState;
    ///
    /// let state = LedgerState::new(Ledger::demo());
    /// let snapshot = state.mutate(|ledger| {
    ///     ledger.update_item(ItemId(1), &ItemPatch::new().rate(20.0));
    /// });
    /// assert_eq!(snapshot.revision, 1);
    /// assert_eq!(snapshot.item_taxes[0].total, 7.2);
    /// ```
    pub fn mutate<F>(&self, f: F) -> LedgerSnapshot
    where
        F: FnOnce(&mut Ledger),
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session.ledger);
        session.revision += 1;
        LedgerSnapshot::from(&*session)
    }

    /// Snapshot of the current session.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.with_session(|session| LedgerSnapshot::from(session))
    }

    /// Replaces the session with a fresh one over `ledger`.
    pub fn reset(&self, ledger: Ledger) -> LedgerSnapshot {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        *session = LedgerSession::new(ledger);
        LedgerSnapshot::from(&*session)
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(Ledger::new())
    }
}
