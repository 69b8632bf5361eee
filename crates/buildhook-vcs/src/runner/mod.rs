//! External command execution.

mod process;

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;

pub use self::process::ProcessCommandRunner;
use crate::{strip_url_credentials, Result};

/// One external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable.
    pub program: String,
    /// Arguments.
    pub args: Vec<String>,
    /// Working directory.
    pub workdir: PathBuf,
    /// Kill the command after this long without output.
    pub timeout: Duration,
    /// Kill the command after this long, whatever its output.
    pub max_time: Option<Duration>,
}

impl CommandSpec {
    /// Creates a command with no arguments.
    pub fn new<P: Into<String>, W: Into<PathBuf>>(program: P, workdir: W, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            workdir: workdir.into(),
            timeout,
            max_time: None,
        }
    }

    /// Append arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the wall time bound.
    pub fn with_max_time(mut self, max_time: Option<Duration>) -> Self {
        self.max_time = max_time;
        self
    }

    /// Command line for logs, without URL credentials.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(strip_url_credentials)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, -1 when killed by a signal.
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external commands.
///
/// A non-zero exit code is not an error at this level; time bound expiry is.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs a command to completion.
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput>;
}
