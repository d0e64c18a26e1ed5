//! Image asset storage port.

use async_trait::async_trait;

/// Store for uploaded image files. The domain only ever sees the resulting
/// path string; how bytes reach the store is the transport's business.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist `bytes` under `filename` and return the stored path.
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, AssetError>;

    /// Remove the file at `path`.
    async fn delete(&self, path: &str) -> Result<(), AssetError>;
}

/// Asset store errors.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset io failure: {0}")]
    Io(String),

    #[error("path {0} escapes the asset store")]
    InvalidPath(String),
}
