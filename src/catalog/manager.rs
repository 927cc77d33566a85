use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::dataset::Column;

/// Metadata registration for an external table: schema plus storage location,
/// letting external query engines read the data in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Catalog namespace (database) the table is registered under.
    pub database: String,
    pub table: String,
    /// Column schema derived from the parsed dataset.
    pub columns: Vec<Column>,
    /// Storage location URI, e.g. "s3://my-bucket/".
    pub location: String,
    /// Field delimiter of the underlying delimited-text data.
    pub delimiter: String,
}

/// Outcome of an idempotent create: pre-existing is success, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    AlreadyExists,
}

/// Errors that can occur during catalog registration.
///
/// "Already exists" is not among them; it is a [`RegisterOutcome`].
/// Every variant here is fatal to the run.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Caller lacks permission on the catalog
    #[error("catalog access denied: {0}")]
    AccessDenied(String),

    /// Entry was rejected as malformed (bad name, bad schema)
    #[error("invalid catalog entry: {0}")]
    InvalidEntry(String),

    /// Any other catalog service failure
    #[error("catalog service error: {0}")]
    Service(String),
}

/// Async interface for catalog operations.
#[async_trait]
pub trait CatalogManager: Debug + Send + Sync {
    /// Create the namespace if absent. Idempotent.
    async fn ensure_database(&self, database: &str) -> Result<RegisterOutcome, CatalogError>;

    /// Register an external table if absent. Idempotent.
    async fn register_external_table(
        &self,
        entry: &CatalogEntry,
    ) -> Result<RegisterOutcome, CatalogError>;
}
