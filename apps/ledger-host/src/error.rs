//! # API Error Type
//!
//! Unified error type for host commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Ledger Host                        │
//! │                                                                         │
//! │  Presentation layer          Rust Host                                  │
//! │  ──────────────────          ─────────                                  │
//! │                                                                         │
//! │  dispatch({ type, payload })                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown type? ─── CoreError::UnknownAction ───────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Malformed payload? ─── CoreError::Validation ── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bad numbers never get here: they are coerced to 0 inside the core.

use ledger_core::CoreError;
use serde::Serialize;

/// Error returned from host commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_ACTION",
///   "message": "Unknown action type: DELETE_ITEM"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Payload was structurally malformed
    ValidationError,

    /// Action type not recognized
    InvalidAction,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownAction(_) => ApiError::new(ErrorCode::InvalidAction, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ledger_core::ValidationError> for ApiError {
    fn from(err: ledger_core::ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}
