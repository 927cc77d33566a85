//! Mock catalog implementation for testing.
//!
//! Provides a configurable mock implementation of `CatalogManager` that can be
//! used in tests to avoid needing a real Glue catalog.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CatalogEntry, CatalogError, CatalogManager, RegisterOutcome};

/// Mock catalog that can be configured to fail for testing error handling.
#[derive(Debug, Default)]
pub struct MockCatalog {
    databases: Mutex<HashSet<String>>,
    tables: Mutex<HashMap<(String, String), CatalogEntry>>,
    fail_access_denied: AtomicBool,
    register_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether catalog operations should fail with access denied.
    pub fn set_fail_access_denied(&self, fail: bool) {
        self.fail_access_denied.store(fail, Ordering::SeqCst);
    }

    /// Number of register_external_table calls made so far.
    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn has_database(&self, database: &str) -> bool {
        self.databases.lock().unwrap().contains(database)
    }

    /// Registered entry for the named table, if any.
    pub fn table(&self, database: &str, table: &str) -> Option<CatalogEntry> {
        self.tables
            .lock()
            .unwrap()
            .get(&(database.to_string(), table.to_string()))
            .cloned()
    }
}

#[async_trait]
impl CatalogManager for MockCatalog {
    async fn ensure_database(&self, database: &str) -> Result<RegisterOutcome, CatalogError> {
        if self.fail_access_denied.load(Ordering::SeqCst) {
            return Err(CatalogError::AccessDenied(
                "mock: not authorized".to_string(),
            ));
        }

        if self.databases.lock().unwrap().insert(database.to_string()) {
            Ok(RegisterOutcome::Created)
        } else {
            Ok(RegisterOutcome::AlreadyExists)
        }
    }

    async fn register_external_table(
        &self,
        entry: &CatalogEntry,
    ) -> Result<RegisterOutcome, CatalogError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_access_denied.load(Ordering::SeqCst) {
            return Err(CatalogError::AccessDenied(
                "mock: not authorized".to_string(),
            ));
        }

        let key = (entry.database.clone(), entry.table.clone());
        let mut tables = self.tables.lock().unwrap();
        if tables.contains_key(&key) {
            Ok(RegisterOutcome::AlreadyExists)
        } else {
            tables.insert(key, entry.clone());
            Ok(RegisterOutcome::Created)
        }
    }
}
