use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod memory;
pub mod s3;

pub use memory::MemoryStorage;
pub use s3::S3Storage;

/// Read-only access to a bucket of objects.
#[async_trait]
pub trait ObjectStorage: Debug + Send + Sync {
    /// Canonical URI of an object, e.g. "s3://bucket/key".
    fn object_url(&self, key: &str) -> String;

    /// Read the full contents of an object.
    async fn read(&self, key: &str) -> Result<Vec<u8>>;

    /// Whether an object exists.
    async fn exists(&self, key: &str) -> Result<bool>;
}
