//! # Error Types
//!
//! Domain-specific error types for ledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ledger-core errors (this file)                                        │
//! │  ├── CoreError        - Malformed actions                              │
//! │  └── ValidationError  - Malformed patch payloads                       │
//! │                                                                         │
//! │  Host API errors (apps/ledger-host)                                    │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Presentation layer     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The recalculation engine itself never fails. These all degrade to a
//! defined default instead of producing an error:
//! - Updating an id that does not exist (silent no-op)
//! - An association whose `itemId`/`taxId` matches nothing (keeps its total)
//! - A non-numeric quantity, rate or charge (coerced to `0`)
//!
//! Errors only come from payloads that are structurally wrong: a patch that
//! is not an object, an enum string outside the allowed set, or an action
//! the reducer does not know.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning host payloads into engine operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The action `type` tag is not one the reducer handles.
    #[error("Unknown action type: {0}")]
    UnknownAction(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Payload validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Value has the wrong shape (e.g. a patch that is not an object).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
