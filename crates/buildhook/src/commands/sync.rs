use std::path::PathBuf;

use async_trait::async_trait;
use buildhook_models::{RepositoryTarget, RevisionSpec, DEFAULT_BRANCH};
use buildhook_vcs::{strip_url_credentials, GitSynchronizer};
use clap::Parser;
use tracing::info;

use super::{Command, CommandContext};
use crate::Result;

/// Synchronize a working tree, then print its HEAD revision
#[derive(Parser)]
pub(crate) struct SyncCommand {
    /// Upstream repository URL
    #[arg(long)]
    repourl: String,
    /// Branch to check out
    #[arg(long, default_value = DEFAULT_BRANCH)]
    branch: String,
    /// Exact revision, branch tip if not precised
    #[arg(long)]
    revision: Option<String>,
    /// Initialize and update submodules
    #[arg(long)]
    submodules: bool,
    /// Allow a depth-limited clone when no revision is requested
    #[arg(long)]
    shallow: bool,
    /// Keep files matched by ignore rules when cleaning
    #[arg(long)]
    no_ignore_ignores: bool,
    /// Build base directory, holding the working tree and the source marker
    #[arg(long)]
    basedir: PathBuf,
    /// Working tree directory, relative to the base directory
    #[arg(long, default_value = "build")]
    srcdir: PathBuf,
}

impl SyncCommand {
    fn target(&self) -> RepositoryTarget {
        RepositoryTarget::new(&self.repourl)
            .with_branch(&self.branch)
            .with_revision(RevisionSpec::from_optional(self.revision.clone()))
            .with_submodules(self.submodules)
            .with_shallow(self.shallow)
            .with_ignore_ignores(!self.no_ignore_ignores)
    }
}

#[async_trait]
impl Command for SyncCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let synchronizer = GitSynchronizer::new(
            ctx.command_runner.as_ref(),
            &ctx.config.vcs,
            &self.basedir,
            &self.srcdir,
            self.target(),
        );

        let report = synchronizer.synchronize().await?;
        info!(
            repourl = %strip_url_credentials(&self.repourl),
            established = report.established,
            cleaned = report.cleaned,
            fetched = report.fetched,
            message = "Working tree synchronized"
        );

        writeln!(
            ctx.writer.write().await,
            "{}",
            report.got_revision.as_deref().unwrap_or("unknown")
        )?;

        Ok(())
    }
}
