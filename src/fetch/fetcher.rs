use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use super::FetchError;
use crate::dataset::Dataset;
use crate::storage::ObjectStorage;

/// Downloads a bucket object to a local transient path and parses it
/// into a [`Dataset`].
#[derive(Debug)]
pub struct SourceFetcher {
    storage: Arc<dyn ObjectStorage>,
    delimiter: u8,
}

impl SourceFetcher {
    pub fn new(storage: Arc<dyn ObjectStorage>, delimiter: u8) -> Self {
        Self { storage, delimiter }
    }

    /// Canonical URI of the source object.
    pub fn object_url(&self, key: &str) -> String {
        self.storage.object_url(key)
    }

    /// Fetch and parse the named object.
    ///
    /// The transient file is removed on every exit path; a failed removal
    /// is logged, not an error.
    pub async fn fetch(&self, key: &str) -> Result<Dataset, FetchError> {
        let bytes = self.storage.read(key).await.map_err(|e| {
            if let Some(object_store::Error::NotFound { .. }) =
                e.downcast_ref::<object_store::Error>()
            {
                FetchError::NotFound(self.storage.object_url(key))
            } else {
                FetchError::Download(e.to_string())
            }
        })?;

        let local_path = transient_path(key);
        if let Some(parent) = local_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&local_path, &bytes)?;
        debug!(path = %local_path.display(), bytes = bytes.len(), "wrote transient file");

        let result = Dataset::from_delimited_path(&local_path, self.delimiter);

        if let Err(e) = std::fs::remove_file(&local_path) {
            warn!(
                path = %local_path.display(),
                error = %e,
                "Failed to remove transient file; file may be orphaned"
            );
        }

        Ok(result?)
    }
}

/// Unique local path for one download, e.g. {temp_dir}/ingest-abc12345/students.csv
fn transient_path(key: &str) -> PathBuf {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    std::env::temp_dir()
        .join(format!("ingest-{}", nanoid::nanoid!(8)))
        .join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ColumnType, Value};
    use crate::storage::MemoryStorage;

    async fn seeded_storage(key: &str, data: &[u8]) -> Arc<dyn ObjectStorage> {
        let storage = MemoryStorage::new("test-bucket");
        storage.put(key, data).await.unwrap();
        Arc::new(storage)
    }

    #[tokio::test]
    async fn fetches_and_parses_object() {
        let storage = seeded_storage("students.csv", b"id,name\n1,Kishor\n2,Kiran\n").await;
        let fetcher = SourceFetcher::new(storage, b',');

        let dataset = fetcher.fetch("students.csv").await.unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.columns[0].column_type, ColumnType::Integer);
        assert_eq!(
            dataset.rows[0],
            vec![Value::Integer(1), Value::Text("Kishor".to_string())]
        );
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let storage: Arc<dyn ObjectStorage> = Arc::new(MemoryStorage::new("test-bucket"));
        let fetcher = SourceFetcher::new(storage, b',');

        let err = fetcher.fetch("absent.csv").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)), "got: {:?}", err);
    }

    #[tokio::test]
    async fn malformed_content_is_parse_error() {
        let storage = seeded_storage("bad.csv", b"id,name\n1,Kishor,extra\n").await;
        let fetcher = SourceFetcher::new(storage, b',');

        let err = fetcher.fetch("bad.csv").await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)), "got: {:?}", err);
    }

    #[tokio::test]
    async fn transient_file_is_removed_after_parse() {
        let storage = seeded_storage("cleanup-check.csv", b"id,name\n1,Kishor\n").await;
        let fetcher = SourceFetcher::new(storage, b',');
        fetcher.fetch("cleanup-check.csv").await.unwrap();

        // No ingest temp directory should still hold the file.
        let leftovers: Vec<_> = std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("ingest-")
                    && entry.path().join("cleanup-check.csv").exists()
            })
            .collect();
        assert!(leftovers.is_empty(), "transient file left behind");
    }
}
