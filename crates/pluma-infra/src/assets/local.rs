//! Local filesystem asset store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use pluma_core::ports::{AssetError, AssetStore};

/// Stores uploaded images under a single root directory on the local disk.
/// Returned paths are relative, forward-slashed, and rooted at that
/// directory, so they can be handed straight to clients as URLs.
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Paths handled by this store must stay inside the root directory.
    fn checked(&self, path: &str) -> Result<PathBuf, AssetError> {
        let candidate = Path::new(path);
        if candidate.components().any(|c| c.as_os_str() == "..") || !candidate.starts_with(&self.root)
        {
            return Err(AssetError::InvalidPath(path.to_string()));
        }
        Ok(candidate.to_path_buf())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, AssetError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AssetError::Io(e.to_string()))?;

        let dest = self.root.join(filename);
        tokio::fs::write(&dest, bytes)
            .await
            .map_err(|e| AssetError::Io(e.to_string()))?;

        tracing::debug!(path = %dest.display(), size = bytes.len(), "image stored");
        Ok(dest.to_string_lossy().replace('\\', "/"))
    }

    async fn delete(&self, path: &str) -> Result<(), AssetError> {
        let target = self.checked(path)?;
        tokio::fs::remove_file(&target)
            .await
            .map_err(|e| AssetError::Io(e.to_string()))?;

        tracing::debug!(path = %target.display(), "image removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store() -> LocalAssetStore {
        let root = std::env::temp_dir().join(format!("pluma-assets-{}", uuid::Uuid::new_v4()));
        LocalAssetStore::new(root)
    }

    #[tokio::test]
    async fn save_then_delete_round_trip() {
        let store = scratch_store();

        let path = store.save("cover.jpg", b"not really a jpeg").await.unwrap();
        assert!(tokio::fs::metadata(&path).await.is_ok());

        store.delete(&path).await.unwrap();
        assert!(tokio::fs::metadata(&path).await.is_err());
    }

    #[tokio::test]
    async fn delete_rejects_paths_outside_the_root() {
        let store = scratch_store();

        let result = store.delete("/etc/passwd").await;
        assert!(matches!(result, Err(AssetError::InvalidPath(_))));

        let result = store.delete("../../somewhere/else.jpg").await;
        assert!(matches!(result, Err(AssetError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn delete_missing_file_reports_io_error() {
        let store = scratch_store();
        let missing = store.root.join("never-written.jpg");

        let result = store.delete(&missing.to_string_lossy()).await;
        assert!(matches!(result, Err(AssetError::Io(_))));
    }
}
