use smart_default::SmartDefault;

/// Branch used when none is requested.
pub const DEFAULT_BRANCH: &str = "master";

/// Which revision of the branch to materialize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RevisionSpec {
    /// Whatever the remote branch points to.
    #[default]
    BranchTip,
    /// An exact commit identifier.
    ExactRevision(String),
}

impl RevisionSpec {
    /// Build from an optional revision, empty strings meaning "tip".
    pub fn from_optional(revision: Option<String>) -> Self {
        match revision {
            Some(rev) if !rev.is_empty() => Self::ExactRevision(rev),
            _ => Self::BranchTip,
        }
    }
}

/// What a repository synchronization should produce.
#[derive(Debug, Clone, SmartDefault, PartialEq, Eq)]
pub struct RepositoryTarget {
    /// Upstream repository URL.
    pub repourl: String,
    /// Branch name.
    #[default(DEFAULT_BRANCH.to_string())]
    pub branch: String,
    /// Requested revision.
    pub revision: RevisionSpec,
    /// Initialize and update submodules.
    pub submodules: bool,
    /// Allow a depth-limited clone when no exact revision is requested.
    pub shallow: bool,
    /// When `true`, cleaning passes `-x` to `git clean` and also deletes
    /// files matched by ignore rules. When `false`, ignored files survive.
    #[default(true)]
    pub ignore_ignores: bool,
}

impl RepositoryTarget {
    /// Creates a target for the default branch tip.
    pub fn new<T: Into<String>>(repourl: T) -> Self {
        Self {
            repourl: repourl.into(),
            ..Default::default()
        }
    }

    /// Set branch, falling back to the default branch when empty.
    pub fn with_branch<T: Into<String>>(mut self, branch: T) -> Self {
        let branch = branch.into();
        self.branch = if branch.is_empty() {
            DEFAULT_BRANCH.into()
        } else {
            branch
        };
        self
    }

    /// Set revision.
    pub fn with_revision(mut self, revision: RevisionSpec) -> Self {
        self.revision = revision;
        self
    }

    /// Set submodules.
    pub fn with_submodules(mut self, value: bool) -> Self {
        self.submodules = value;
        self
    }

    /// Set shallow.
    pub fn with_shallow(mut self, value: bool) -> Self {
        self.shallow = value;
        self
    }

    /// Set ignore ignores (`true` purges ignored files too).
    pub fn with_ignore_ignores(mut self, value: bool) -> Self {
        self.ignore_ignores = value;
        self
    }

    /// Source marker content for this target.
    pub fn sourcedata(&self) -> String {
        format!("{} {}\n", self.repourl, self.branch)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let target = RepositoryTarget::new("git://example.com/repo.git");

        assert_eq!(target.branch, "master");
        assert_eq!(target.revision, RevisionSpec::BranchTip);
        assert!(target.ignore_ignores);
        assert!(!target.submodules);
        assert!(!target.shallow);
        assert_eq!(target.sourcedata(), "git://example.com/repo.git master\n");
    }

    #[test]
    fn empty_branch_means_default() {
        let target = RepositoryTarget::new("repo").with_branch("");
        assert_eq!(target.branch, DEFAULT_BRANCH);
    }

    #[test]
    fn revision_from_optional() {
        assert_eq!(RevisionSpec::from_optional(None), RevisionSpec::BranchTip);
        assert_eq!(
            RevisionSpec::from_optional(Some(String::new())),
            RevisionSpec::BranchTip
        );
        assert_eq!(
            RevisionSpec::from_optional(Some("abc".into())),
            RevisionSpec::ExactRevision("abc".into())
        );
    }
}
