//! In-memory object storage used by tests.

use anyhow::Result;
use async_trait::async_trait;
use object_store::memory::InMemory;
use object_store::{path::Path as ObjectPath, ObjectStore};

use super::ObjectStorage;

#[derive(Debug)]
pub struct MemoryStorage {
    bucket: String,
    store: InMemory,
}

impl MemoryStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            store: InMemory::new(),
        }
    }

    /// Seed an object into the store.
    pub async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = ObjectPath::from(key);
        self.store.put(&path, data.to_vec().into()).await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
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
