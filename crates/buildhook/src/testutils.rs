use std::{io::Write, sync::Arc};

use buildhook_config::{Config, DispatchDriver};
use buildhook_dispatch_interface::MockControllerService;
use buildhook_vcs::MockCommandRunner;
use clap::Parser;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub controller_service: MockControllerService,
    pub command_runner: MockCommandRunner,
}

impl CommandContextTest {
    pub fn new() -> Self {
        let mut config = Config::from_env_no_version().unwrap();
        config.dispatch.driver = DispatchDriver::Null;

        Self {
            config,
            controller_service: MockControllerService::new(),
            command_runner: MockCommandRunner::new(),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            controller_service: Box::new(self.controller_service),
            command_runner: Box::new(self.command_runner),
            writer,
        }
    }
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["buildhook"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone()))
                .await
                .unwrap(),
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    }

    let vec = buf.read().await.to_vec();
    std::str::from_utf8(&vec).unwrap().to_string()
}
