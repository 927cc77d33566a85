//! Error types for source fetch operations

use thiserror::Error;

use crate::dataset::ParseError;

/// Errors that can occur while fetching and parsing the source object.
///
/// All of these are fatal to the run; the catalog fallback only covers
/// the relational write step.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Source object does not exist in the bucket
    #[error("source object not found: {0}")]
    NotFound(String),

    /// Download from object storage failed
    #[error("download failed: {0}")]
    Download(String),

    /// Local transient file could not be written or read
    #[error("transient file error: {0}")]
    TempFile(String),

    /// Downloaded content is not well-formed delimited text
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::TempFile(e.to_string())
    }
}
