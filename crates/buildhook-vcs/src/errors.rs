//! VCS errors.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// VCS error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum VcsError {
    /// Command exited with a non-zero status.
    #[error("Command '{command}' failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// Command was killed for exceeding a time bound.
    #[error("Command '{command}' timed out after {timeout:?}")]
    CommandTimeout { command: String, timeout: Duration },

    /// Command could not be started.
    #[error("Could not start command '{command}',\n  caused by: {source}")]
    SpawnError {
        command: String,
        source: std::io::Error,
    },

    /// Filesystem error around the working tree.
    #[error("I/O error on '{}',\n  caused by: {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result alias for `VcsError`.
pub type Result<T> = core::result::Result<T, VcsError>;
