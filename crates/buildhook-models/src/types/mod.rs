//! Hosting service webhook types.

mod push;

pub use push::{GhCommit, GhCommitUser, GhPushEvent, GhPushRepository, GhRepositoryOwner};
