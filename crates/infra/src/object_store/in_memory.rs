use std::collections::BTreeMap;
use std::sync::RwLock;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use storegate_buckets::{BucketSummary, ObjectSummary, StoredObject};
use storegate_core::{StoreError, StoreResult};

use super::ObjectStorage;

#[derive(Debug)]
struct MemoryObject {
    body: Bytes,
    last_modified: DateTime<Utc>,
}

#[derive(Debug)]
struct MemoryBucket {
    created_at: DateTime<Utc>,
    objects: BTreeMap<String, MemoryObject>,
}

/// In-memory object storage for tests/dev.
///
/// Buckets must be created up front (`with_bucket`/`create_bucket`); like
/// S3, uploads never create them implicitly.
#[derive(Debug, Default)]
pub struct InMemoryObjectStorage {
    buckets: RwLock<BTreeMap<String, MemoryBucket>>,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(self, name: impl Into<String>) -> Self {
        self.create_bucket(name);
        self
    }

    /// Create an empty bucket; an existing bucket is left untouched.
    pub fn create_bucket(&self, name: impl Into<String>) {
        if let Ok(mut buckets) = self.buckets.write() {
            buckets.entry(name.into()).or_insert_with(|| MemoryBucket {
                created_at: Utc::now(),
                objects: BTreeMap::new(),
            });
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("objects.memory", "lock poisoned")
}

#[async_trait::async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn list_buckets(&self) -> StoreResult<Vec<BucketSummary>> {
        let buckets = self.buckets.read().map_err(|_| poisoned())?;
        Ok(buckets
            .iter()
            .map(|(name, bucket)| BucketSummary {
                name: name.clone(),
                created_at: Some(bucket.created_at),
            })
            .collect())
    }

    async fn list_objects(&self, bucket: &str) -> StoreResult<Vec<ObjectSummary>> {
        let buckets = self.buckets.read().map_err(|_| poisoned())?;
        let bucket = buckets.get(bucket).ok_or(StoreError::NotFound)?;
        Ok(bucket
            .objects
            .iter()
            .map(|(key, object)| ObjectSummary {
                key: key.clone(),
                size: object.body.len() as u64,
                last_modified: Some(object.last_modified),
                etag: None,
            })
            .collect())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        _content_type: Option<String>,
    ) -> StoreResult<StoredObject> {
        let mut buckets = self.buckets.write().map_err(|_| poisoned())?;
        let entry = buckets.get_mut(bucket).ok_or(StoreError::NotFound)?;
        let size = body.len() as u64;
        entry.objects.insert(
            key.to_string(),
            MemoryObject {
                body,
                last_modified: Utc::now(),
            },
        );
        Ok(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size,
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StoreResult<()> {
        let mut buckets = self.buckets.write().map_err(|_| poisoned())?;
        let entry = buckets.get_mut(bucket).ok_or(StoreError::NotFound)?;
        entry.objects.remove(key);
        Ok(())
    }
}
