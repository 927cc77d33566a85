//! Mock sink implementation for testing.
//!
//! Provides a configurable mock implementation of `RelationalSink` that can be
//! used in tests to avoid needing a real MySQL server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{RelationalSink, SinkError};
use crate::dataset::Dataset;

/// Mock sink that records written tables and can be configured to fail.
#[derive(Debug, Default)]
pub struct MockSink {
    tables: Mutex<HashMap<String, Dataset>>,
    fail_with: Mutex<Option<SinkError>>,
    attempts: AtomicUsize,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the error every subsequent write attempt returns.
    pub fn set_fail_with(&self, error: SinkError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    /// Number of write attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Dataset last written to the named table, if any.
    pub fn table(&self, name: &str) -> Option<Dataset> {
        self.tables.lock().unwrap().get(name).cloned()
    }
}

#[async_trait]
impl RelationalSink for MockSink {
    async fn replace_table(&self, table: &str, dataset: &Dataset) -> Result<u64, SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(error);
        }

        let rows = dataset.row_count() as u64;
        self.tables
            .lock()
            .unwrap()
            .insert(table.to_string(), dataset.clone());
        Ok(rows)
    }
}
