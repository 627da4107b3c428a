//! Upload and converted directories on the local filesystem.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::StorageError;
use super::naming::is_safe_download_name;
use crate::config::StorageConfig;

/// Locations used by the service.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    upload_dir: PathBuf,
    converted_dir: PathBuf,
}

/// A per-request directory under the upload dir that keeps temp inputs of
/// concurrent requests apart.
#[derive(Debug)]
pub struct RequestDir {
    path: PathBuf,
}

impl RequestDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temp path for an uploaded file in this request.
    pub fn input_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }

    /// Removes the directory together with anything left inside it.
    pub async fn remove(self) {
        if let Err(e) = fs::remove_dir_all(&self.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = ?self.path, error = %e, "Failed to remove request directory");
            }
        }
    }
}

impl StorageLayout {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            converted_dir: config.converted_dir.clone(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn converted_dir(&self) -> &Path {
        &self.converted_dir
    }

    /// Creates the upload and converted directories if missing.
    pub async fn ensure_dirs(&self) -> Result<(), StorageError> {
        for dir in [&self.upload_dir, &self.converted_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| StorageError::DirectoryCreationFailed {
                    path: dir.clone(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Creates a fresh, uniquely named directory for one request's inputs.
    pub async fn create_request_dir(&self) -> Result<RequestDir, StorageError> {
        let path = self.upload_dir.join(Uuid::new_v4().to_string());
        fs::create_dir_all(&path)
            .await
            .map_err(|e| StorageError::DirectoryCreationFailed {
                path: path.clone(),
                source: e,
            })?;
        Ok(RequestDir { path })
    }

    /// Writes an upload to disk and returns its size as stored.
    pub async fn save_upload(path: &Path, content: &[u8]) -> Result<u64, std::io::Error> {
        fs::write(path, content).await?;
        Ok(fs::metadata(path).await?.len())
    }

    /// Removes a temp file if it exists. Returns whether a file was removed.
    pub async fn discard(path: &Path) -> bool {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!(?path, "Removed temporary input");
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                warn!(?path, error = %e, "Failed to remove temporary input");
                false
            }
        }
    }

    /// Destination path of a converted artifact.
    pub fn converted_path(&self, filename: &str) -> PathBuf {
        self.converted_dir.join(filename)
    }

    /// Resolves a download request to a path inside the converted directory.
    ///
    /// Returns `None` for names that could escape the directory.
    pub fn resolve_download(&self, name: &str) -> Option<PathBuf> {
        if !is_safe_download_name(name) {
            return None;
        }
        Some(self.converted_dir.join(name))
    }

    /// Deletes converted artifacts last modified more than `max_age` ago.
    ///
    /// Returns the number of files removed. Entries that cannot be inspected
    /// or removed are logged and skipped.
    pub async fn sweep_expired(&self, max_age: Duration) -> Result<usize, StorageError> {
        let mut entries =
            fs::read_dir(&self.converted_dir)
                .await
                .map_err(|e| StorageError::ReadDirFailed {
                    path: self.converted_dir.clone(),
                    source: e,
                })?;

        let now = SystemTime::now();
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                Ok(_) => continue,
                Err(e) => {
                    warn!(?path, error = %e, "Failed to read metadata during sweep");
                    continue;
                }
            };

            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or_default();

            if age > max_age {
                match fs::remove_file(&path).await {
                    Ok(()) => {
                        debug!(?path, age_secs = age.as_secs(), "Removed expired artifact");
                        removed += 1;
                    }
                    Err(e) => warn!(?path, error = %e, "Failed to remove expired artifact"),
                }
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout(root: &Path) -> StorageLayout {
        StorageLayout::new(&StorageConfig {
            upload_dir: root.join("uploads"),
            converted_dir: root.join("converted"),
        })
    }

    #[tokio::test]
    async fn test_ensure_dirs() {
        let temp = TempDir::new().unwrap();
        let layout = layout(temp.path());
        layout.ensure_dirs().await.unwrap();
        assert!(layout.upload_dir().is_dir());
        assert!(layout.converted_dir().is_dir());
    }

    #[tokio::test]
    async fn test_request_dirs_are_unique() {
        let temp = TempDir::new().unwrap();
        let layout = layout(temp.path());
        let a = layout.create_request_dir().await.unwrap();
        let b = layout.create_request_dir().await.unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.path().starts_with(layout.upload_dir()));

        let a_path = a.path().to_path_buf();
        a.remove().await;
        assert!(!a_path.exists());
        assert!(b.path().exists());
    }

    #[tokio::test]
    async fn test_save_and_discard() {
        let temp = TempDir::new().unwrap();
        let layout = layout(temp.path());
        let dir = layout.create_request_dir().await.unwrap();
        let path = dir.input_path("clip.mp4");

        let size = StorageLayout::save_upload(&path, &[0u8; 2048]).await.unwrap();
        assert_eq!(size, 2048);

        assert!(StorageLayout::discard(&path).await);
        assert!(!path.exists());
        // Second discard is a no-op
        assert!(!StorageLayout::discard(&path).await);
    }

    #[test]
    fn test_resolve_download() {
        let layout = layout(Path::new("/srv"));
        assert_eq!(
            layout.resolve_download("photo_converted.jpg"),
            Some(PathBuf::from("/srv/converted/photo_converted.jpg"))
        );
        assert_eq!(layout.resolve_download("../uploads/x.png"), None);
        assert_eq!(layout.resolve_download(""), None);
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let temp = TempDir::new().unwrap();
        let layout = layout(temp.path());
        layout.ensure_dirs().await.unwrap();

        std::fs::write(layout.converted_path("old_converted.mp3"), b"old").unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Nothing is older than an hour
        assert_eq!(layout.sweep_expired(Duration::from_secs(3600)).await.unwrap(), 0);

        // Everything is older than zero
        assert_eq!(layout.sweep_expired(Duration::ZERO).await.unwrap(), 1);
        assert!(!layout.converted_path("old_converted.mp3").exists());
    }

    #[tokio::test]
    async fn test_sweep_missing_dir_errors() {
        let temp = TempDir::new().unwrap();
        let layout = layout(temp.path());
        let result = layout.sweep_expired(Duration::ZERO).await;
        assert!(matches!(result, Err(StorageError::ReadDirFailed { .. })));
    }
}
