use buildhook_config::DispatchConfig;
use buildhook_dispatch_interface::{
    ControllerConnection, ControllerService, Credentials, DispatchError,
};
use buildhook_models::{ChangeRecord, ControllerAddress};
use tracing::{debug, error, info, warn};

use crate::Result;

/// Where and as whom changes are submitted.
#[derive(Debug, Clone)]
pub struct DispatchTarget {
    /// Controller address.
    pub address: ControllerAddress,
    /// Change source credentials.
    pub credentials: Credentials,
}

impl DispatchTarget {
    /// Build from configuration.
    pub fn from_config(config: &DispatchConfig) -> Result<Self> {
        Ok(Self {
            address: config.master_address.parse()?,
            credentials: Credentials::new(&config.username, &config.password),
        })
    }
}

/// Submit changes over one connection, one call at a time.
///
/// Each change is sent only after the previous one was acknowledged. The
/// first failure stops the batch; nothing is retried.
#[tracing::instrument(skip_all, fields(address = %target.address, changes = changes.len()))]
pub async fn dispatch_changes(
    service: &dyn ControllerService,
    target: &DispatchTarget,
    changes: &[ChangeRecord],
) -> Result<usize> {
    if changes.is_empty() {
        warn!("No changes found");
        return Ok(0);
    }

    let mut connection = service.connect(&target.address).await.map_err(|e| {
        error!(error = %e, message = "Could not connect to controller");
        e
    })?;

    match submit_changes(connection.as_mut(), &target.credentials, changes).await {
        Ok(count) => {
            connection.close().await?;
            info!(count = count, message = "Changes submitted");
            Ok(count)
        }
        Err(e) => {
            error!(error = %e, message = "Could not submit changes to controller");
            if let Err(close_error) = connection.close().await {
                debug!(error = %close_error, message = "Could not close controller connection");
            }

            Err(e.into())
        }
    }
}

async fn submit_changes(
    connection: &mut dyn ControllerConnection,
    credentials: &Credentials,
    changes: &[ChangeRecord],
) -> core::result::Result<usize, DispatchError> {
    connection.authenticate(credentials).await?;

    for change in changes {
        debug!(revision = change.short_revision(), message = "Submitting change");
        connection.add_change(change).await?;
    }

    Ok(changes.len())
}
