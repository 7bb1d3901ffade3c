//! Error types for the `tvm` binary.

use thiserror::Error;
use tvm_calc_core::TvmError;

/// Errors surfaced at the command-line boundary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Text typed (or passed) where a number was expected
    #[error("Invalid {field}: '{value}' is not a valid {expected}")]
    InputParse {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// Unrecognised menu selection; reported and the menu is shown again
    #[error("Invalid choice '{0}'. Please try again.")]
    InvalidChoice(String),

    #[error("{0}")]
    MissingArgument(String),

    #[error("Failed to read '{path}': {reason}")]
    InputFile { path: String, reason: String },

    #[error("Calculation failed: {0}")]
    Calculation(#[from] TvmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Errors the interactive session reports and recovers from.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CliError::Io(_))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
