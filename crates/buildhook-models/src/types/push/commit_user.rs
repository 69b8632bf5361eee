use serde::{Deserialize, Serialize};

/// GitHub Commit user.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhCommitUser {
    /// Name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Username.
    #[serde(default)]
    pub username: Option<String>,
}

impl GhCommitUser {
    /// Display string, as `name <email>`.
    pub fn display(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}
