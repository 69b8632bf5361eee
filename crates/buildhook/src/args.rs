use std::sync::Arc;

use buildhook_config::{Config, DispatchDriver};
use buildhook_dispatch_interface::ControllerService;
use buildhook_dispatch_null::NullControllerService;
use buildhook_dispatch_tcp::TcpControllerService;
use buildhook_sentry::with_sentry_configuration;
use buildhook_vcs::{CommandRunner, ProcessCommandRunner};
use clap::Parser;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let controller_service: Box<dyn ControllerService> = match config.dispatch.driver {
                DispatchDriver::Tcp => {
                    info!("Using TcpControllerService dispatch driver");
                    Box::new(TcpControllerService::new())
                }
                DispatchDriver::Null => {
                    info!("Using NullControllerService dispatch driver");
                    Box::new(NullControllerService::new())
                }
            };

            let ctx = CommandContext {
                config: config.clone(),
                controller_service,
                command_runner: Box::new(ProcessCommandRunner::new()) as Box<dyn CommandRunner>,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            with_sentry_configuration(&config.clone(), || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
