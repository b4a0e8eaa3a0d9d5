//! Error types for the fitroom pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole try-on pipeline.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. User-facing strings are not
/// taken from these variants; the orchestrator maps them to stable messages
/// and keeps the variant detail for diagnostics only.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FitroomError {
    /// A local file could not be read, or its payload could not be extracted
    /// from the encoded carrier. Recovered per slot; never aborts the session.
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// `generate()` was invoked before both slots were populated.
    /// No collaborator call is made for this variant.
    #[error("Missing inputs: both a person and a clothing image are required")]
    MissingInputs,

    /// The external synthesis collaborator rejected the request or errored.
    /// The message is diagnostic detail, not meant for display.
    #[error("Synthesis error: {message}")]
    Synthesis { message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FitroomError {
    /// Creates an Encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Creates a Synthesis error
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an Encoding error
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }

    /// Check if this is a MissingInputs error
    pub fn is_missing_inputs(&self) -> bool {
        matches!(self, Self::MissingInputs)
    }

    /// Check if this is a Synthesis error
    pub fn is_synthesis(&self) -> bool {
        matches!(self, Self::Synthesis { .. })
    }
}

impl From<std::io::Error> for FitroomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FitroomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// A type alias for `Result<T, FitroomError>`.
pub type Result<T> = std::result::Result<T, FitroomError>;
