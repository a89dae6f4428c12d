//! Saved HTML snapshot source.
//!
//! Reads a report view that was saved from a logged-in browser. Useful for
//! offline runs and for re-processing a report without logging in again.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{SourceError, SourceResult};
use crate::traits::source::{DocumentSession, DocumentSource, LoadedPage};

/// Source backed by an HTML file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for SnapshotSource {
    async fn open(&self) -> SourceResult<Box<dyn DocumentSession>> {
        debug!(path = %self.path.display(), "Opening snapshot");
        Ok(Box::new(SnapshotSession {
            path: self.path.clone(),
            closed: false,
        }))
    }

    fn name(&self) -> &str {
        "snapshot"
    }
}

struct SnapshotSession {
    path: PathBuf,
    closed: bool,
}

#[async_trait]
impl DocumentSession for SnapshotSession {
    async fn load_report(&mut self) -> SourceResult<LoadedPage> {
        if self.closed {
            return Err(SourceError::Closed);
        }

        let html = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        info!(path = %self.path.display(), bytes = html.len(), "Snapshot loaded");
        Ok(LoadedPage::new(self.path.display().to_string(), html))
    }

    async fn close(&mut self) -> SourceResult<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_loads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        std::fs::write(&path, "<p class=\"comment-text\">Hi</p>").unwrap();

        let source = SnapshotSource::new(&path);
        let mut session = source.open().await.unwrap();
        let page = assert_ok!(session.load_report().await);

        assert!(page.html.contains("comment-text"));
        assert_eq!(page.location, path.display().to_string());
        assert_ok!(session.close().await);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = SnapshotSource::new("/definitely/not/here.html");
        let mut session = source.open().await.unwrap();
        let err = assert_err!(session.load_report().await);
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn test_closed_session_refuses_loads() {
        let source = SnapshotSource::new("/tmp/unused.html");
        let mut session = source.open().await.unwrap();
        session.close().await.unwrap();
        assert!(matches!(
            session.load_report().await,
            Err(SourceError::Closed)
        ));
    }
}
