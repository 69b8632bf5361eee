//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use buildhook_config::Config;
use buildhook_dispatch_interface::ControllerService;
use buildhook_vcs::CommandRunner;
use clap::Subcommand;
use tokio::sync::RwLock;

use self::{extract::ExtractCommand, server::ServerCommand, sync::SyncCommand};
use crate::Result;

mod extract;
mod server;
mod sync;

pub(crate) struct CommandContext {
    pub config: Config,
    pub controller_service: Box<dyn ControllerService>,
    pub command_runner: Box<dyn CommandRunner>,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Sync(SyncCommand),
    Extract(ExtractCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Sync(sub) => sub.execute(ctx).await,
            Self::Extract(sub) => sub.execute(ctx).await,
        }
    }
}
