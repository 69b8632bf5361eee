//! Controller interfaces.

use async_trait::async_trait;
use buildhook_models::{ChangeRecord, ControllerAddress};

use crate::{Credentials, DispatchError};

/// Opens connections to the build controller.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ControllerService: Send + Sync {
    /// Opens a new connection.
    async fn connect(
        &self,
        address: &ControllerAddress,
    ) -> Result<Box<dyn ControllerConnection>, DispatchError>;

    /// Health check
    async fn health_check(&self, address: &ControllerAddress) -> Result<(), DispatchError>;
}

/// One open connection to the build controller.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ControllerConnection: Send {
    /// Logs in as a change source.
    async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), DispatchError>;
    /// Submits one change, returning once the controller acknowledged it.
    async fn add_change(&mut self, change: &ChangeRecord) -> Result<(), DispatchError>;
    /// Closes the connection.
    async fn close(&mut self) -> Result<(), DispatchError>;
}
