//! Git working tree synchronization.

use std::path::{Path, PathBuf};

use buildhook_config::VcsConfig;
use buildhook_models::{RepositoryTarget, RevisionSpec};
use tracing::{debug, info, warn};

use crate::{
    is_full_revision, strip_url_credentials, CommandOutput, CommandRunner, CommandSpec,
    Result, SourceMarker, VcsError,
};

/// What the source marker says about an existing checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// Marker is missing or unreadable.
    Unknown,
    /// Marker records another repository.
    OtherRepository,
    /// Marker records the same repository on another branch.
    OtherBranch,
    /// Marker records the target repository and branch.
    Current,
}

/// On-disk state of the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkdirState {
    /// Nothing there yet.
    Absent,
    /// A directory without a git checkout.
    NotACheckout,
    /// A git checkout.
    Checkout(MarkerState),
}

/// Summary of one synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// The checkout was created from scratch.
    pub established: bool,
    /// Untracked content was purged before updating.
    pub cleaned: bool,
    /// Refs were fetched from the remote.
    pub fetched: bool,
    /// Full commit id of HEAD, `None` when git answered something else.
    pub got_revision: Option<String>,
}

/// Brings one working directory to a [`RepositoryTarget`].
///
/// Calls against the same working directory must be serialized by the caller.
pub struct GitSynchronizer<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a VcsConfig,
    basedir: PathBuf,
    workdir: PathBuf,
    marker: SourceMarker,
    target: RepositoryTarget,
}

impl<'a> GitSynchronizer<'a> {
    /// Creates a synchronizer for `<basedir>/<srcdir>`.
    pub fn new<B: Into<PathBuf>, S: AsRef<Path>>(
        runner: &'a dyn CommandRunner,
        config: &'a VcsConfig,
        basedir: B,
        srcdir: S,
        target: RepositoryTarget,
    ) -> Self {
        let basedir = basedir.into();
        let workdir = basedir.join(srcdir);
        let marker = SourceMarker::new(basedir.join(&config.sourcedata_filename));

        Self {
            runner,
            config,
            basedir,
            workdir,
            marker,
            target,
        }
    }

    /// Working tree path.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Source marker.
    pub fn marker(&self) -> &SourceMarker {
        &self.marker
    }

    /// Classify the working directory against the target.
    pub async fn inspect(&self) -> WorkdirState {
        if !self.workdir.exists() {
            return WorkdirState::Absent;
        }

        if !self.workdir.join(".git").exists() {
            return WorkdirState::NotACheckout;
        }

        let state = match self.marker.read().await {
            None => MarkerState::Unknown,
            Some(data) if data == self.target.sourcedata() => MarkerState::Current,
            Some(data) if data.starts_with(&format!("{} ", self.target.repourl)) => {
                MarkerState::OtherBranch
            }
            Some(_) => MarkerState::OtherRepository,
        };

        WorkdirState::Checkout(state)
    }

    /// Run a full synchronization.
    #[tracing::instrument(skip_all, fields(
        repourl = %strip_url_credentials(&self.target.repourl),
        branch = %self.target.branch,
        workdir = %self.workdir.display()
    ))]
    pub async fn synchronize(&self) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        match self.inspect().await {
            WorkdirState::Absent => {
                self.establish().await?;
                report.established = true;
            }
            WorkdirState::NotACheckout => {
                warn!(message = "Working directory is not a checkout, clobbering");
                tokio::fs::remove_dir_all(&self.workdir)
                    .await
                    .map_err(|e| VcsError::IoError {
                        path: self.workdir.clone(),
                        source: e,
                    })?;
                self.establish().await?;
                report.established = true;
            }
            WorkdirState::Checkout(MarkerState::Current) => {
                debug!(message = "Checkout matches target");
            }
            WorkdirState::Checkout(state) => {
                info!(marker = ?state, message = "Checkout targeted something else, cleaning");
                self.clean().await?;
                report.cleaned = true;
            }
        }

        report.fetched = self.update().await?;

        if let Err(e) = self.marker.write(&self.target.sourcedata()).await {
            warn!(error = %e, message = "Could not persist source marker");
        }

        report.got_revision = self.got_revision().await?;
        Ok(report)
    }

    /// Resolve HEAD to a full commit id.
    pub async fn got_revision(&self) -> Result<Option<String>> {
        let output = self.git(["rev-parse", "HEAD"]).await?;
        let revision = output.stdout.trim();

        if is_full_revision(revision) {
            Ok(Some(revision.into()))
        } else {
            warn!(output = %revision, message = "Unexpected HEAD revision format");
            Ok(None)
        }
    }

    async fn establish(&self) -> Result<()> {
        if self.target.shallow && self.target.revision == RevisionSpec::BranchTip {
            create_dir_all(&self.basedir).await?;

            let workdir = self.workdir.to_string_lossy();
            self.run_checked(
                self.command(&self.basedir).with_args([
                    "clone",
                    "--depth",
                    "1",
                    self.target.repourl.as_str(),
                    &*workdir,
                ]),
            )
            .await?;
        } else {
            create_dir_all(&self.workdir).await?;
            self.git(["init"]).await?;
        }

        Ok(())
    }

    async fn clean(&self) -> Result<()> {
        let mut args = vec!["clean", "-f", "-d"];
        if self.target.ignore_ignores {
            args.push("-x");
        }

        self.git(args).await.map(|_| ())
    }

    /// Converge the checkout, returning whether a fetch happened.
    async fn update(&self) -> Result<bool> {
        let reset = match &self.target.revision {
            RevisionSpec::ExactRevision(revision) => {
                match self.git(["reset", "--hard", revision.as_str()]).await {
                    Ok(_) => true,
                    Err(
                        e @ (VcsError::CommandFailed { .. } | VcsError::CommandTimeout { .. }),
                    ) => {
                        debug!(revision = %revision, error = %e, message = "Direct reset failed, fetching");
                        false
                    }
                    Err(e) => return Err(e),
                }
            }
            RevisionSpec::BranchTip => false,
        };

        if !reset {
            let refspec = format!("+{}", self.target.branch);
            info!(
                branch = %self.target.branch,
                repourl = %strip_url_credentials(&self.target.repourl),
                message = "Fetching branch"
            );
            self.git(["fetch", "-t", self.target.repourl.as_str(), refspec.as_str()])
                .await?;

            let head = match &self.target.revision {
                RevisionSpec::ExactRevision(revision) => revision.as_str(),
                RevisionSpec::BranchTip => "FETCH_HEAD",
            };
            self.git(["reset", "--hard", head]).await?;
        }

        self.git(["branch", "-M", self.target.branch.as_str()]).await?;

        if self.target.submodules {
            self.update_submodules().await?;
        }

        Ok(!reset)
    }

    async fn update_submodules(&self) -> Result<()> {
        self.git(["submodule", "init"]).await?;
        self.git(["submodule", "update"]).await?;

        let mut args = vec!["submodule", "foreach", "git", "clean", "-d", "-f"];
        if self.target.ignore_ignores {
            args.push("-x");
        }
        self.git(args).await.map(|_| ())
    }

    fn command(&self, workdir: &Path) -> CommandSpec {
        CommandSpec::new(&self.config.git_executable, workdir, self.config.timeout())
            .with_max_time(self.config.max_time())
    }

    async fn git<I, S>(&self, args: I) -> Result<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run_checked(self.command(&self.workdir).with_args(args))
            .await
    }

    async fn run_checked(&self, command: CommandSpec) -> Result<CommandOutput> {
        let output = self.runner.run(&command).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(VcsError::CommandFailed {
                command: command.display(),
                exit_code: output.exit_code,
                stderr: output.stderr.trim().into(),
            })
        }
    }
}

async fn create_dir_all(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| VcsError::IoError {
            path: path.into(),
            source: e,
        })
}
