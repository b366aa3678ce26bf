//! Error types for the scrip CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//!
//! Note that the validation engine itself never produces errors: detected
//! safety issues are data, not failures. `SafetyError` is raised by commands
//! that refuse to proceed while critical issues are present.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for scrip operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum ScripError {
    /// User provided invalid arguments or the store is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// Critical safety issues block the requested operation.
    #[error("Safety check failed: {0}")]
    SafetyError(String),

    /// The record store could not be read or written.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}

impl ScripError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScripError::UserError(_) => exit_codes::USER_ERROR,
            ScripError::SafetyError(_) => exit_codes::SAFETY_FAILURE,
            ScripError::StoreError(_) => exit_codes::STORE_FAILURE,
        }
    }
}

/// Result type alias for scrip operations.
pub type Result<T> = std::result::Result<T, ScripError>;
