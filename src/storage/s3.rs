// src/storage/s3.rs
use anyhow::Result;
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::{path::Path as ObjectPath, ObjectStore};
use std::sync::Arc;

use super::ObjectStorage;
use crate::config::{AwsConfig, SourceConfig};

#[derive(Debug)]
pub struct S3Storage {
    bucket: String,
    store: Arc<dyn ObjectStore>,
}

impl S3Storage {
    /// Build S3 storage from validated configuration.
    ///
    /// A custom endpoint switches to path-style addressing for
    /// MinIO/S3-compatible servers.
    pub fn new(aws: &AwsConfig, source: &SourceConfig) -> Result<Self> {
        let bucket = source.bucket.clone().unwrap_or_default();

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&bucket)
            .with_region(aws.region.clone().unwrap_or_default())
            .with_access_key_id(aws.access_key.clone().unwrap_or_default())
            .with_secret_access_key(aws.secret_key.clone().unwrap_or_default());

        if let Some(endpoint) = &source.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(true)
                .with_virtual_hosted_style_request(false);
        }

        let store = builder.build()?;

        Ok(Self {
            bucket,
            store: Arc::new(store),
        })
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    fn object_url(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key.trim_start_matches('/'))
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = ObjectPath::from(key.trim_start_matches('/'));
        let result = self.store.get(&path).await?;
        let bytes = result.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = ObjectPath::from(key.trim_start_matches('/'));
        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_format() {
        let storage = S3Storage {
            bucket: "test-bucket".to_string(),
            store: Arc::new(object_store::memory::InMemory::new()),
        };

        assert_eq!(
            storage.object_url("students.csv"),
            "s3://test-bucket/students.csv"
        );
        assert_eq!(
            storage.object_url("/nested/students.csv"),
            "s3://test-bucket/nested/students.csv"
        );
    }
}
