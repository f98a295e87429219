//! # Error Types
//!
//! Structured error types for vasthra_core. Every failure the two screens can
//! run into maps onto one variant here, and each variant knows the inline
//! message the upload screen shows for it.
//!
//! ## Example
//!
//! ```rust
//! use vasthra_core::errors::{VasthraError, VasthraResult};
//!
//! fn require_selection(selected: bool) -> VasthraResult<()> {
//!     if !selected {
//!         return Err(VasthraError::NoFileSelected);
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_selection(false).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for vasthra_core operations
pub type VasthraResult<T> = Result<T, VasthraError>;

/// Shown when a dropped or picked file is not PNG/JPEG
pub const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Please upload a PNG or JPEG file.";

/// Shown when Generate is pressed with nothing selected
pub const NO_FILE_MESSAGE: &str = "No file uploaded. Please upload a PNG or JPEG file.";

/// Shown for transport failures and non-success HTTP statuses
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Shown when the service reports failure without a detail string
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate design";

/// Structured error type for upload, generation and download operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum VasthraError {
    /// The candidate file's declared media type is not PNG or JPEG
    #[error("Invalid media type for '{file_name}': {declared_type}")]
    InvalidMediaType {
        file_name: String,
        declared_type: String,
    },

    /// Generate was requested with no file selected
    #[error("No file selected")]
    NoFileSelected,

    /// The request never produced an HTTP response
    #[error("Transport error calling '{url}': {reason}")]
    Transport { url: String, reason: String },

    /// The service answered with a non-success status
    #[error("HTTP {status} from '{url}'")]
    HttpStatus { url: String, status: u16 },

    /// The response body could not be understood
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// The service answered but flagged the generation as failed
    #[error("Generation rejected: {}", .detail.as_deref().unwrap_or("no detail"))]
    GenerationRejected { detail: Option<String> },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Configuration could not be located or applied
    #[error("Config error: {reason}")]
    ConfigError { reason: String },
}

impl VasthraError {
    /// Create an InvalidMediaType error
    pub fn invalid_media_type(file_name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        VasthraError::InvalidMediaType {
            file_name: file_name.into(),
            declared_type: declared_type.into(),
        }
    }

    /// Create a Transport error
    pub fn transport(url: impl Into<String>, reason: impl Into<String>) -> Self {
        VasthraError::Transport {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedResponse error
    pub fn malformed(reason: impl Into<String>) -> Self {
        VasthraError::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        VasthraError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        VasthraError::SerializationError {
            reason: reason.into(),
        }
    }

    /// The message the upload screen displays for this error.
    ///
    /// Transport, status and decoding failures all collapse into the same
    /// generic server message; only a rejection carries the server's text.
    pub fn user_message(&self) -> String {
        match self {
            VasthraError::InvalidMediaType { .. } => INVALID_TYPE_MESSAGE.to_string(),
            VasthraError::NoFileSelected => NO_FILE_MESSAGE.to_string(),
            VasthraError::Transport { .. }
            | VasthraError::HttpStatus { .. }
            | VasthraError::MalformedResponse { .. } => SERVER_ERROR_MESSAGE.to_string(),
            VasthraError::GenerationRejected { detail } => detail
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| GENERATION_FAILED_MESSAGE.to_string()),
            other => other.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VasthraError::InvalidMediaType { .. } => "INVALID_MEDIA_TYPE",
            VasthraError::NoFileSelected => "NO_FILE_SELECTED",
            VasthraError::Transport { .. } => "TRANSPORT_ERROR",
            VasthraError::HttpStatus { .. } => "HTTP_STATUS",
            VasthraError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            VasthraError::GenerationRejected { .. } => "GENERATION_REJECTED",
            VasthraError::FileError { .. } => "FILE_ERROR",
            VasthraError::SerializationError { .. } => "SERIALIZATION_ERROR",
            VasthraError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}
