//! Domain-level error type.
//!
//! Most per-file problems are recorded as a status plus a [`crate::Diagnostic`]
//! rather than raised — steps are not expected to fail the whole run because
//! one file has a malformed header. `TopmarkError` is reserved for the small
//! set of hard failures that abort setup or a single file's I/O outright:
//! registry construction, policy freezing, and sink errors.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum TopmarkError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("unknown file type: {0}")]
    UnknownFileType(String),

    #[error("no processor registered for: {0}")]
    NoProcessorRegistered(String),

    #[error("io error: {0}")]
    IoError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl TopmarkError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn invalid_policy(msg: impl Into<String>) -> Self {
        Self::InvalidPolicy(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::IoError(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether a caller might reasonably retry the operation unchanged.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TopmarkError::IoError(_))
    }

    pub fn category(&self) -> &'static str {
        match self {
            TopmarkError::InvalidConfiguration(_) => "configuration",
            TopmarkError::InvalidPolicy(_) => "configuration",
            TopmarkError::UnknownFileType(_) => "resolution",
            TopmarkError::NoProcessorRegistered(_) => "resolution",
            TopmarkError::IoError(_) => "io",
            TopmarkError::SerializationError(_) => "serialization",
            TopmarkError::ValidationError(_) => "validation",
            TopmarkError::InternalError(_) => "internal",
        }
    }
}

impl From<std::io::Error> for TopmarkError {
    fn from(err: std::io::Error) -> Self {
        TopmarkError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for TopmarkError {
    fn from(err: serde_json::Error) -> Self {
        TopmarkError::SerializationError(err.to_string())
    }
}
