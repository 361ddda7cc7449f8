//! Error types for trap generation.
//!
//! The synthesis engine itself never fails: malformed events and records are
//! skipped. These errors cover the layers around it, namely envelope parsing,
//! output serialization and configuration loading.

use std::io;
use thiserror::Error;

/// Result type alias for trapgend operations.
pub type TrapGenResult<T> = Result<T, TrapGenError>;

/// Errors that can occur around trap synthesis.
#[derive(Debug, Error)]
pub enum TrapGenError {
    /// Input was valid JSON but not a usable envelope.
    #[error("Invalid trap envelope: {message}")]
    InvalidEnvelope {
        /// Error message.
        message: String,
    },

    /// Envelope carries neither `_trap_info_` nor `platform`.
    #[error("Trap envelope has neither '_trap_info_' nor 'platform'")]
    MissingSections,

    /// JSON parse or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    Configuration {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl TrapGenError {
    /// Creates an invalid envelope error.
    pub fn invalid_envelope(message: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error was caused by the input the host handed us,
    /// as opposed to local configuration or IO.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TrapGenError::InvalidEnvelope { .. }
                | TrapGenError::MissingSections
                | TrapGenError::Json(_)
        )
    }
}
