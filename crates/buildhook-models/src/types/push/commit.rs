use serde::{Deserialize, Serialize};

use super::GhCommitUser;

/// GitHub Commit, as embedded in a push event.
///
/// The timestamp is kept verbatim: its offset encoding is not always RFC 3339,
/// see `buildhook_core::normalize_timestamp`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhCommit {
    /// Commit SHA.
    pub id: String,
    /// Commit URL.
    pub url: String,
    /// Message.
    pub message: String,
    /// Timestamp.
    pub timestamp: String,
    /// Author.
    pub author: GhCommitUser,
    /// Added.
    pub added: Vec<String>,
    /// Modified.
    pub modified: Vec<String>,
    /// Removed.
    pub removed: Vec<String>,
}

impl GhCommit {
    /// Touched files: added, then modified, then removed.
    pub fn files(&self) -> Vec<String> {
        self.added
            .iter()
            .chain(self.modified.iter())
            .chain(self.removed.iter())
            .cloned()
            .collect()
    }
}
