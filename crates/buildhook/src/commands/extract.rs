use std::path::PathBuf;

use async_trait::async_trait;
use buildhook_core::use_cases::changes::extract_changes;
use buildhook_models::types::GhPushEvent;
use clap::Parser;

use super::{Command, CommandContext};
use crate::Result;

/// Print the changes extracted from a saved push event, as JSON
#[derive(Parser)]
pub(crate) struct ExtractCommand {
    /// Push event JSON file
    input_file: PathBuf,
}

#[async_trait]
impl Command for ExtractCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let content = tokio::fs::read_to_string(&self.input_file).await?;
        let event: GhPushEvent = serde_json::from_str(&content)?;
        let changes = extract_changes(&event)?;

        writeln!(
            ctx.writer.write().await,
            "{}",
            serde_json::to_string_pretty(&changes)?
        )?;

        Ok(())
    }
}
