use serde::{Deserialize, Serialize};

/// GitHub Repository owner, as sent in push events.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhRepositoryOwner {
    /// Name.
    pub name: String,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
}

/// GitHub Repository, as sent in push events.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPushRepository {
    /// Name.
    pub name: String,
    /// URL.
    pub url: String,
    /// Private?
    pub private: bool,
    /// Owner.
    pub owner: GhRepositoryOwner,
}

impl GhPushRepository {
    /// Owner and name, as `owner/name`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner.name, self.name)
    }
}
