//! Sequences fetch → relational load → (conditionally) catalog fallback.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::{CatalogEntry, CatalogManager, RegisterOutcome};
use crate::config::IngestConfig;
use crate::fetch::SourceFetcher;
use crate::sink::{RelationalSink, SinkError};
use crate::storage::ObjectStorage;

/// Names and locations one run operates on, taken from validated config.
#[derive(Debug, Clone)]
pub struct IngestPlan {
    /// Key of the source object inside the bucket.
    pub object_key: String,
    pub delimiter: u8,
    /// Relational table written with replace semantics.
    pub sink_table: String,
    pub catalog_database: String,
    pub catalog_table: String,
    /// Storage location URI registered for the external table.
    pub catalog_location: String,
}

impl IngestPlan {
    /// Build a plan from validated configuration.
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            object_key: config.source.key.clone().unwrap_or_default(),
            delimiter: config.delimiter_byte(),
            sink_table: config.sink.table.clone().unwrap_or_default(),
            catalog_database: config.catalog.database.clone().unwrap_or_default(),
            catalog_table: config.catalog.table.clone().unwrap_or_default(),
            catalog_location: config.catalog.location.clone().unwrap_or_default(),
        }
    }
}

/// Terminal outcome of one run. The two variants are mutually exclusive:
/// a run either loads the relational table or falls back to the catalog.
#[derive(Debug)]
pub enum RunOutcome {
    /// Relational load succeeded; fallback was never invoked.
    Loaded { rows: u64 },
    /// Relational load failed and the catalog fallback completed.
    FellBack {
        sink_error: SinkError,
        outcome: RegisterOutcome,
    },
}

/// One-shot ingest pipeline.
///
/// Exactly one relational-write attempt per run; exactly one fallback
/// attempt, only when the write fails. A fetch failure aborts before
/// either. No retries, no rollback.
#[derive(Debug)]
pub struct IngestPipeline {
    fetcher: SourceFetcher,
    sink: Arc<dyn RelationalSink>,
    catalog: Arc<dyn CatalogManager>,
    plan: IngestPlan,
}

impl IngestPipeline {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        sink: Arc<dyn RelationalSink>,
        catalog: Arc<dyn CatalogManager>,
        plan: IngestPlan,
    ) -> Self {
        Self {
            fetcher: SourceFetcher::new(storage, plan.delimiter),
            sink,
            catalog,
            plan,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let source_url = self.fetcher.object_url(&self.plan.object_key);
        info!(source = %source_url, "fetching source object");

        // Fetch failure is fatal; the fallback only covers the write step.
        let dataset = self
            .fetcher
            .fetch(&self.plan.object_key)
            .await
            .with_context(|| format!("failed to fetch source object {}", source_url))?;
        info!(
            rows = dataset.row_count(),
            columns = dataset.columns.len(),
            "parsed source dataset"
        );

        info!(table = %self.plan.sink_table, "loading into relational sink");
        match self.sink.replace_table(&self.plan.sink_table, &dataset).await {
            Ok(rows) => {
                info!(table = %self.plan.sink_table, rows, "relational load complete");
                Ok(RunOutcome::Loaded { rows })
            }
            Err(sink_error) => {
                warn!(
                    category = sink_error.category(),
                    error = %sink_error,
                    "relational load failed, falling back to catalog"
                );

                self.catalog
                    .ensure_database(&self.plan.catalog_database)
                    .await
                    .context("failed to ensure catalog database")?;

                let entry = CatalogEntry {
                    database: self.plan.catalog_database.clone(),
                    table: self.plan.catalog_table.clone(),
                    // Schema derived from the parsed dataset, so the two
                    // write paths cannot drift apart.
                    columns: dataset.columns.clone(),
                    location: self.plan.catalog_location.clone(),
                    delimiter: (self.plan.delimiter as char).to_string(),
                };
                let outcome = self
                    .catalog
                    .register_external_table(&entry)
                    .await
                    .context("failed to register catalog table")?;

                match outcome {
                    RegisterOutcome::Created => {
                        info!(
                            database = %entry.database,
                            table = %entry.table,
                            location = %entry.location,
                            "catalog table created"
                        );
                    }
                    RegisterOutcome::AlreadyExists => {
                        info!(
                            database = %entry.database,
                            table = %entry.table,
                            "catalog table already exists"
                        );
                    }
                }

                Ok(RunOutcome::FellBack {
                    sink_error,
                    outcome,
                })
            }
        }
    }
}
