use std::collections::BTreeMap;

use buildhook_models::{types::GhPushEvent, ChangeRecord};
use tracing::{debug, info};

use crate::{normalize_timestamp, Result};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Extract the branch name from a `refs/heads/<name>` reference.
pub fn extract_branch_name(reference: &str) -> Option<&str> {
    reference
        .strip_prefix(BRANCH_REF_PREFIX)
        .filter(|name| !name.is_empty())
}

/// Deleted references are pushed with an all-zero revision.
pub fn is_deleted_revision(revision: &str) -> bool {
    revision.chars().all(|c| c == '0')
}

/// Build one change per pushed commit, in push order.
///
/// Pushes to anything but a branch, and branch deletions, produce no change.
/// A single malformed commit timestamp rejects the whole event.
#[tracing::instrument(skip_all, fields(
    reference = event.reference,
    repository = %event.repository.path(),
    commits = event.commits.len(),
))]
pub fn extract_changes(event: &GhPushEvent) -> Result<Vec<ChangeRecord>> {
    let Some(branch) = extract_branch_name(&event.reference) else {
        info!(
            reference = event.reference,
            message = "Ignoring reference: not a branch"
        );
        return Ok(Vec::new());
    };

    if is_deleted_revision(&event.after) {
        info!(branch = branch, message = "Branch deleted, ignoring");
        return Ok(Vec::new());
    }

    event
        .commits
        .iter()
        .map(|commit| -> Result<ChangeRecord> {
            let change = ChangeRecord {
                revision: commit.id.clone(),
                revlink: commit.url.clone(),
                comments: commit.message.clone(),
                branch: branch.to_string(),
                who: commit.author.display(),
                files: commit.files(),
                links: vec![commit.url.clone()],
                when: normalize_timestamp(&commit.timestamp)?,
                repository: event.repository.url.clone(),
                properties: BTreeMap::from([(
                    "repository".to_string(),
                    event.repository.url.clone(),
                )]),
            };

            info!(revision = change.short_revision(), message = "New revision");
            debug!(change = ?change);

            Ok(change)
        })
        .collect()
}
