//! Source marker persistence.

use std::path::{Path, PathBuf};

use crate::{Result, VcsError};

/// Small file recording which repository and branch the last checkout targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMarker {
    path: PathBuf,
}

impl SourceMarker {
    /// Creates a marker stored at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Marker location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read marker content, `None` when missing or unreadable.
    pub async fn read(&self) -> Option<String> {
        tokio::fs::read_to_string(&self.path).await.ok()
    }

    /// Replace marker content.
    pub async fn write(&self, content: &str) -> Result<()> {
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| VcsError::IoError {
                path: self.path.clone(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn missing_marker() {
        let dir = tempfile::tempdir().unwrap();
        let marker = SourceMarker::new(dir.path().join(".buildhook-sourcedata"));

        assert_eq!(marker.read().await, None);
    }

    #[tokio::test]
    async fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let marker = SourceMarker::new(dir.path().join(".buildhook-sourcedata"));

        marker.write("git://example.com/repo.git master\n").await.unwrap();
        marker.write("git://example.com/repo.git devel\n").await.unwrap();

        assert_eq!(
            marker.read().await.as_deref(),
            Some("git://example.com/repo.git devel\n")
        );
    }

    #[tokio::test]
    async fn write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let marker = SourceMarker::new(dir.path().join("missing").join("marker"));

        assert!(matches!(
            marker.write("data").await,
            Err(VcsError::IoError { .. })
        ));
    }
}
