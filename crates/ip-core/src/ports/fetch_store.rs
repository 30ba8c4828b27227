use std::path::Path;

use async_trait::async_trait;

use crate::paste::ImageSource;
use crate::ports::errors::FetchError;

/// Retrieves image bytes and persists them.
#[async_trait]
pub trait FetchStorePort: Send + Sync {
    /// Store `source` under `target_dir` and return the reference to embed.
    ///
    /// # Contract
    /// - `target_dir` is created if it does not exist
    /// - a fresh, collision-free file name is generated for every call
    /// - no timeout is imposed by callers; implementations own that policy
    async fn fetch_and_store(
        &self,
        source: &ImageSource,
        target_dir: &Path,
    ) -> Result<String, FetchError>;
}
