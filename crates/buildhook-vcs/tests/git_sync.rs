//! Synchronization against a real git executable.
//!
//! Run with `cargo test -p buildhook-vcs -- --ignored`.

use std::{path::Path, process::Command};

use buildhook_config::VcsConfig;
use buildhook_models::{RepositoryTarget, RevisionSpec};
use buildhook_vcs::{GitSynchronizer, ProcessCommandRunner};
use pretty_assertions::assert_eq;

fn git(workdir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .env("GIT_AUTHOR_NAME", "Build Bot")
        .env("GIT_AUTHOR_EMAIL", "bot@example.com")
        .env("GIT_COMMITTER_NAME", "Build Bot")
        .env("GIT_COMMITTER_EMAIL", "bot@example.com")
        .output()
        .unwrap();
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

fn commit(upstream: &Path, name: &str) -> String {
    std::fs::write(upstream.join(name), name).unwrap();
    git(upstream, &["add", name]);
    git(upstream, &["commit", "-q", "-m", name]);
    git(upstream, &["rev-parse", "HEAD"])
}

fn config() -> VcsConfig {
    VcsConfig {
        git_executable: "git".into(),
        timeout: 60,
        max_time: Some(300),
        sourcedata_filename: ".buildhook-sourcedata".into(),
    }
}

#[tokio::test]
#[ignore]
async fn sync_follows_upstream() {
    let upstream = tempfile::tempdir().unwrap();
    git(upstream.path(), &["init", "-q", "-b", "master"]);
    let first = commit(upstream.path(), "first.txt");

    let basedir = tempfile::tempdir().unwrap();
    let config = config();
    let runner = ProcessCommandRunner::new();
    let repourl = upstream.path().to_string_lossy().into_owned();

    let sync = GitSynchronizer::new(
        &runner,
        &config,
        basedir.path(),
        "build",
        RepositoryTarget::new(&repourl),
    );
    let report = sync.synchronize().await.unwrap();
    assert!(report.established);
    assert_eq!(report.got_revision.as_deref(), Some(first.as_str()));

    let second = commit(upstream.path(), "second.txt");
    std::fs::write(sync.workdir().join("untracked.txt"), "junk").unwrap();

    let report = sync.synchronize().await.unwrap();
    assert!(!report.cleaned);
    assert_eq!(report.got_revision.as_deref(), Some(second.as_str()));
    assert!(sync.workdir().join("second.txt").exists());
    assert!(sync.workdir().join("untracked.txt").exists());

    let pinned = GitSynchronizer::new(
        &runner,
        &config,
        basedir.path(),
        "build",
        RepositoryTarget::new(&repourl).with_revision(RevisionSpec::ExactRevision(first.clone())),
    );
    let report = pinned.synchronize().await.unwrap();
    assert!(!report.fetched);
    assert_eq!(report.got_revision.as_deref(), Some(first.as_str()));
    assert!(!pinned.workdir().join("second.txt").exists());
}
