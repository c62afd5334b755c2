//! S3 adapter.
//!
//! Credentials come from `ACCESS_KEY_ID`/`SECRET_ACCESS_KEY` when both are
//! set, otherwise from the SDK's default provider chain. A custom endpoint
//! (MinIO, LocalStack) switches to path-style addressing.

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::{ByteStream, DateTime as S3DateTime};
use aws_sdk_s3::Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::instrument;

use storegate_buckets::{BucketSummary, ObjectSummary, StoredObject};
use storegate_core::{StoreError, StoreResult};

use super::ObjectStorage;
use crate::config::S3Config;

/// Error codes S3 uses for a missing bucket or key.
const NOT_FOUND_CODES: [&str; 2] = ["NoSuchBucket", "NoSuchKey"];

#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: Client,
}

impl S3ObjectStorage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some((access_key_id, secret_access_key)) = config.static_credentials() {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                config.session_token.clone(),
                None,
                "environment",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if config.endpoint.is_some() {
            builder = builder.force_path_style(true);
        }
        Self::new(Client::from_conf(builder.build()))
    }
}

fn map_s3_error<E>(operation: &'static str, err: E) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err.code() {
        Some(code) if NOT_FOUND_CODES.contains(&code) => StoreError::NotFound,
        _ => StoreError::backend(operation, DisplayErrorContext(&err)),
    }
}

fn to_chrono(value: Option<&S3DateTime>) -> Option<DateTime<Utc>> {
    value.and_then(|d| DateTime::from_timestamp(d.secs(), d.subsec_nanos()))
}

#[async_trait::async_trait]
impl ObjectStorage for S3ObjectStorage {
    #[instrument(skip(self), err)]
    async fn list_buckets(&self) -> StoreResult<Vec<BucketSummary>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| map_s3_error("objects.list_buckets", e))?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| {
                Some(BucketSummary {
                    name: bucket.name()?.to_string(),
                    created_at: to_chrono(bucket.creation_date()),
                })
            })
            .collect())
    }

    #[instrument(skip(self), err)]
    async fn list_objects(&self, bucket: &str) -> StoreResult<Vec<ObjectSummary>> {
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| map_s3_error("objects.list_objects", e))?;

            for object in output.contents() {
                let Some(key) = object.key() else { continue };
                objects.push(ObjectSummary {
                    key: key.to_string(),
                    size: object.size().unwrap_or(0).max(0) as u64,
                    last_modified: to_chrono(object.last_modified()),
                    etag: object.e_tag().map(|t| t.trim_matches('"').to_string()),
                });
            }

            match output.next_continuation_token() {
                Some(token) if output.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(objects)
    }

    #[instrument(skip(self, body), fields(size = body.len()), err)]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: Option<String>,
    ) -> StoreResult<StoredObject> {
        let size = body.len() as u64;
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .set_content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| map_s3_error("objects.put_object", e))?;

        Ok(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size,
        })
    }

    #[instrument(skip(self), err)]
    async fn delete_object(&self, bucket: &str, key: &str) -> StoreResult<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_s3_error("objects.delete_object", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;

    #[test]
    fn missing_bucket_and_key_codes_map_to_not_found() {
        for code in NOT_FOUND_CODES {
            let err = ErrorMetadata::builder().code(code).message("gone").build();
            assert_eq!(map_s3_error("objects.test", err), StoreError::NotFound);
        }
    }

    #[test]
    fn other_codes_are_backend_errors() {
        let err = ErrorMetadata::builder()
            .code("AccessDenied")
            .message("Access Denied")
            .build();
        let mapped = map_s3_error("objects.test", err);
        match mapped {
            StoreError::Backend { operation, detail } => {
                assert_eq!(operation, "objects.test");
                assert!(detail.contains("AccessDenied"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn timestamps_convert_to_utc() {
        let converted = to_chrono(Some(&S3DateTime::from_secs(1_714_564_800))).unwrap();
        assert_eq!(converted.to_rfc3339(), "2024-05-01T12:00:00+00:00");
        assert!(to_chrono(None).is_none());
    }

    #[tokio::test]
    async fn custom_endpoint_builds_a_client() {
        let config = S3Config {
            region: "us-east-1".to_string(),
            access_key_id: Some("minio".to_string()),
            secret_access_key: Some("minio123".to_string()),
            session_token: None,
            endpoint: Some("http://127.0.0.1:9000".to_string()),
        };
        let storage = S3ObjectStorage::from_config(&config).await;
        assert_eq!(
            storage.client.config().region().map(|r| r.as_ref()),
            Some("us-east-1")
        );
    }
}
