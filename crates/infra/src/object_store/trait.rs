use bytes::Bytes;

use storegate_buckets::{BucketSummary, ObjectSummary, StoredObject};
use storegate_core::StoreResult;

/// Bucket/object operations exposed under `/buckets`.
///
/// An unknown bucket is `StoreError::NotFound` for every method.
#[async_trait::async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn list_buckets(&self) -> StoreResult<Vec<BucketSummary>>;

    /// Every object in the bucket, across all result pages.
    async fn list_objects(&self, bucket: &str) -> StoreResult<Vec<ObjectSummary>>;

    /// Store `body` under `key`, replacing any existing object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: Option<String>,
    ) -> StoreResult<StoredObject>;

    /// Deleting a key that does not exist succeeds.
    async fn delete_object(&self, bucket: &str, key: &str) -> StoreResult<()>;
}
