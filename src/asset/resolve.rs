//! Path-to-image resolution against a scanned [`AssetIndex`].

use super::{AssetError, AssetIndex, ImageMetadata};
use std::sync::Arc;

/// Resolves image lookup keys to metadata.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    index: Arc<AssetIndex>,
}

impl ImageResolver {
    pub fn new(index: Arc<AssetIndex>) -> Self {
        Self { index }
    }

    /// Resolve one key, e.g. `/src/assets/posts/images/cat.png`.
    pub async fn resolve(&self, path: &str) -> Result<ImageMetadata, AssetError> {
        let loader = self.index.get(path).ok_or_else(|| AssetError::NotFound {
            path: path.to_string(),
            pattern: self.index.pattern().to_string(),
        })?;
        loader.load().await
    }

    /// Resolve every key concurrently, one task per key.
    ///
    /// Results come back in input order.
    pub async fn resolve_all<I>(&self, paths: I) -> Vec<Result<ImageMetadata, AssetError>>
    where
        I: IntoIterator<Item = String>,
    {
        let handles: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let resolver = self.clone();
                tokio::spawn(async move { resolver.resolve(&path).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.unwrap_or_else(|err| Err(AssetError::Join(err))));
        }
        results
    }
}
