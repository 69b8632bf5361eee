//! Server errors.

use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not read request payload,\n  caused by: {source}")]
    PayloadError {
        source: actix_web::error::PayloadError,
    },

    #[error("Could not decode form body,\n  caused by: {source}")]
    FormDecodeError { source: serde_urlencoded::de::Error },

    #[error("Missing form field '{field}'")]
    MissingPayloadField { field: String },

    #[error("Error while parsing push event,\n  caused by: {source}")]
    EventParseError { source: serde_json::Error },

    #[error("Could not set up metrics: {reason}")]
    MetricsError { reason: String },

    #[error("I/O error,\n  caused by: {source}")]
    IoError { source: std::io::Error },

    #[error("Domain error,\n  caused by: {source}")]
    DomainError {
        source: buildhook_core::DomainError,
    },
}

impl From<buildhook_core::DomainError> for ServerError {
    fn from(e: buildhook_core::DomainError) -> Self {
        Self::DomainError { source: e }
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
