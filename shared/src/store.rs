use crate::error::Result;
use async_trait::async_trait;

/// Bucket/key addressed text storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads the whole object and decodes it as UTF-8.
    async fn read(&self, bucket: &str, key: &str) -> Result<String>;

    /// Keys from a single listing call, in listing order.
    async fn list_keys(&self, bucket: &str) -> Result<Vec<String>>;

    /// Keys from every listing page. Stores that never truncate can rely on the default.
    async fn list_all_keys(&self, bucket: &str) -> Result<Vec<String>> {
        self.list_keys(bucket).await
    }
}
