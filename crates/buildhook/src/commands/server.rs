use async_trait::async_trait;
use buildhook_core::use_cases::changes::DispatchTarget;
use buildhook_server::{run_server, AppContext};
use clap::Parser;

use super::{Command, CommandContext};
use crate::{config_validator::validate_dispatch_configuration, Result};

/// Start the change hook server
#[derive(Parser)]
pub(crate) struct ServerCommand;

#[async_trait]
impl Command for ServerCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        validate_dispatch_configuration(&ctx.config)?;
        let dispatch_target = DispatchTarget::from_config(&ctx.config.dispatch)?;

        tokio::task::spawn_local(async move {
            let context =
                AppContext::new_with_adapters(ctx.config, ctx.controller_service, dispatch_target);

            run_server(context).await
        })
        .await??;

        Ok(())
    }
}
