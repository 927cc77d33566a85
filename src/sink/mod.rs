mod error;
mod mock_sink;
mod mysql;

pub use error::SinkError;
pub use mock_sink::MockSink;
pub use mysql::MysqlSink;

use async_trait::async_trait;

use crate::dataset::Dataset;

/// Destructive table-replace write into a relational database.
#[async_trait]
pub trait RelationalSink: Send + Sync + std::fmt::Debug {
    /// Drop any existing table of this name, recreate it with the dataset's
    /// columns, and insert all rows. Returns the number of rows written.
    ///
    /// Errors are categorized, never panics; the caller decides whether to
    /// fall back.
    async fn replace_table(&self, table: &str, dataset: &Dataset) -> Result<u64, SinkError>;
}
