use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Per-run directory for transient synthesis artifacts.
///
/// Each generation run owns one store, so names never collide across
/// concurrent runs. The directory is removed when the store is dropped.
pub struct ArtifactStore {
    dir: TempDir,
}

impl ArtifactStore {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("superlearning-")
            .tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write an artifact and return its location
    pub async fn persist(&self, name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }

    /// Poll until the artifact exists with non-zero size.
    /// Callers bound this with a timeout.
    pub async fn wait_ready(&self, path: &Path) {
        loop {
            if let Ok(meta) = tokio::fs::metadata(path).await {
                if meta.len() > 0 {
                    return;
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Read an artifact and delete it
    pub async fn take(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        let data = tokio::fs::read(path).await?;
        self.remove(path).await;
        Ok(data)
    }

    pub async fn remove(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove artifact");
            }
        }
    }

    /// Number of artifacts still on disk
    pub fn pending(&self) -> usize {
        std::fs::read_dir(self.dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
