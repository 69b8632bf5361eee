//! Repository synchronization for build agents.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod runner;
mod sourcedata;
mod synchronizer;
mod utils;

pub use errors::{Result, VcsError};
#[cfg(any(test, feature = "testkit"))]
pub use runner::MockCommandRunner;
pub use runner::{CommandOutput, CommandRunner, CommandSpec, ProcessCommandRunner};
pub use sourcedata::SourceMarker;
pub use synchronizer::{GitSynchronizer, MarkerState, SyncReport, WorkdirState};
pub use utils::{is_full_revision, strip_url_credentials};
