use serde::{Deserialize, Serialize};

use super::{GhCommit, GhPushRepository};

/// GitHub Push event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPushEvent {
    /// Updated reference.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Revision before the push.
    #[serde(default)]
    pub before: Option<String>,
    /// Revision after the push. All zeros when the reference was deleted.
    pub after: String,
    /// Repository.
    pub repository: GhPushRepository,
    /// Pushed commits, oldest first.
    pub commits: Vec<GhCommit>,
}
