//! Null controller channel: acknowledges everything, submits nothing.

use async_trait::async_trait;
use buildhook_dispatch_interface::{
    ControllerConnection, ControllerService, Credentials, DispatchError,
};
use buildhook_models::{ChangeRecord, ControllerAddress};
use tracing::{debug, info};

/// Null controller service.
#[derive(Clone, Default)]
pub struct NullControllerService {
    _private: (),
}

impl NullControllerService {
    /// Creates a null controller service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl ControllerService for NullControllerService {
    async fn connect(
        &self,
        address: &ControllerAddress,
    ) -> Result<Box<dyn ControllerConnection>, DispatchError> {
        debug!(address = %address, message = "Opening null controller connection");
        Ok(Box::new(NullControllerConnection))
    }

    async fn health_check(&self, address: &ControllerAddress) -> Result<(), DispatchError> {
        debug!(address = %address, message = "Null controller is always healthy");
        Ok(())
    }
}

struct NullControllerConnection;

#[async_trait]
impl ControllerConnection for NullControllerConnection {
    #[tracing::instrument(skip_all, fields(username = %credentials.username))]
    async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), DispatchError> {
        Ok(())
    }

    async fn add_change(&mut self, change: &ChangeRecord) -> Result<(), DispatchError> {
        info!(
            revision = change.short_revision(),
            branch = %change.branch,
            message = "Discarding change (null dispatch driver)"
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DispatchError> {
        Ok(())
    }
}
