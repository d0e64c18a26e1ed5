//! Image lifecycle decisions.

use std::sync::Arc;

use crate::ports::AssetStore;

/// Decides when an uploaded image file must be removed: when a post is
/// deleted, and when the upload endpoint replaces a prior file.
///
/// Removal is best-effort. A stale image left on disk must never fail the
/// surrounding mutation, so failures are logged and swallowed here.
#[derive(Clone)]
pub struct AssetLifecycle {
    store: Arc<dyn AssetStore>,
}

impl AssetLifecycle {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// Issue a deletion intent for the file at `path`.
    pub async fn discard(&self, path: &str) {
        if let Err(err) = self.store.delete(path).await {
            tracing::warn!(%path, error = %err, "failed to remove stale image");
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::ports::AssetError;

    struct BrokenStore;

    #[async_trait]
    impl AssetStore for BrokenStore {
        async fn save(&self, _filename: &str, _bytes: &[u8]) -> Result<String, AssetError> {
            Err(AssetError::Io("disk full".into()))
        }

        async fn delete(&self, path: &str) -> Result<(), AssetError> {
            Err(AssetError::Io(format!("cannot unlink {path}")))
        }
    }

    #[tokio::test]
    async fn discard_swallows_store_failures() {
        let lifecycle = AssetLifecycle::new(Arc::new(BrokenStore));
        // Must return normally even though the store errors.
        lifecycle.discard("images/gone.jpg").await;
    }
}
