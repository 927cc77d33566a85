//! Error types for relational write operations

use thiserror::Error;

/// Tagged failure reason for a relational write attempt.
///
/// The pipeline logs the category and proceeds to the catalog fallback;
/// a sink error on its own never aborts the process.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// Could not reach or talk to the database server
    #[error("connection failed: {0}")]
    Connection(String),

    /// Server rejected the credentials
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// DDL or insert failed after a connection was established
    #[error("write failed: {0}")]
    Write(String),
}

impl SinkError {
    /// Short category tag for operator-facing logs.
    pub fn category(&self) -> &'static str {
        match self {
            SinkError::Connection(_) => "connection",
            SinkError::Authentication(_) => "authentication",
            SinkError::Write(_) => "write",
        }
    }
}

impl From<sqlx::Error> for SinkError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) => {
                // SQLSTATE 28000: access denied
                if db.code().as_deref() == Some("28000") {
                    SinkError::Authentication(e.to_string())
                } else {
                    SinkError::Write(e.to_string())
                }
            }
            sqlx::Error::Configuration(_) => SinkError::Connection(e.to_string()),
            sqlx::Error::Io(_) => SinkError::Connection(e.to_string()),
            sqlx::Error::Tls(_) => SinkError::Connection(e.to_string()),
            _ => SinkError::Connection(e.to_string()),
        }
    }
}
