//! Domain errors.

use thiserror::Error;

/// Domain error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    /// Commit timestamp offset could not be decoded.
    #[error("Malformed commit timestamp: '{timestamp}'")]
    MalformedTimestamp { timestamp: String },

    /// Wraps [`buildhook_models::ControllerAddressError`].
    #[error("Invalid dispatch configuration: {source}")]
    ControllerAddressError {
        source: buildhook_models::ControllerAddressError,
    },

    /// Wraps [`buildhook_dispatch_interface::DispatchError`].
    #[error("Dispatch error: {source}")]
    DispatchError {
        source: buildhook_dispatch_interface::DispatchError,
    },
}

impl From<buildhook_models::ControllerAddressError> for DomainError {
    fn from(e: buildhook_models::ControllerAddressError) -> Self {
        Self::ControllerAddressError { source: e }
    }
}

impl From<buildhook_dispatch_interface::DispatchError> for DomainError {
    fn from(e: buildhook_dispatch_interface::DispatchError) -> Self {
        Self::DispatchError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
