use buildhook_models::ControllerAddress;
use thiserror::Error;

/// Dispatch error.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DispatchError {
    /// Could not reach the controller.
    #[error("Could not connect to controller at {address},\n  caused by: {source}")]
    ConnectError {
        address: ControllerAddress,
        source: std::io::Error,
    },

    /// Controller refused the credentials.
    #[error("Authentication refused for user '{username}': {reason}")]
    AuthenticationError { username: String, reason: String },

    /// Controller answered a call with an error.
    #[error("Remote call '{method}' failed: {reason}")]
    RemoteCallError { method: String, reason: String },

    /// Controller answered something unexpected.
    #[error("Protocol error: {reason}")]
    ProtocolError { reason: String },

    /// Connection broke during a call.
    #[error("I/O error on controller connection,\n  caused by: {source}")]
    IoError { source: std::io::Error },

    /// Implementation-specific error
    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
