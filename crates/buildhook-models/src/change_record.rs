use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

/// Normalized change, as submitted to the build controller.
#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Commit identifier.
    pub revision: String,
    /// Link to the commit page.
    pub revlink: String,
    /// Commit message.
    pub comments: String,
    /// Branch name, without the `refs/heads/` prefix.
    pub branch: String,
    /// Author, as `name <email>`.
    pub who: String,
    /// Touched files: added, then modified, then removed.
    pub files: Vec<String>,
    /// Links, currently only the revision link.
    pub links: Vec<String>,
    /// Commit time.
    #[default(OffsetDateTime::UNIX_EPOCH)]
    #[serde(with = "time::serde::timestamp")]
    pub when: OffsetDateTime,
    /// Repository URL.
    pub repository: String,
    /// Extra properties.
    pub properties: BTreeMap<String, String>,
}

impl ChangeRecord {
    /// Abbreviated revision, for logging.
    pub fn short_revision(&self) -> &str {
        let end = self
            .revision
            .char_indices()
            .nth(8)
            .map_or(self.revision.len(), |(i, _)| i);
        &self.revision[..end]
    }
}
