use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use csvingest::catalog::{CatalogManager, GlueCatalog};
use csvingest::config::IngestConfig;
use csvingest::pipeline::{IngestPipeline, IngestPlan, RunOutcome};
use csvingest::sink::{MysqlSink, RelationalSink};
use csvingest::storage::{ObjectStorage, S3Storage};

#[derive(Parser)]
#[command(
    name = "csvingest",
    about = "Load a CSV object into MySQL, with a Glue catalog fallback"
)]
struct Cli {
    /// Path to config file. Environment variables with the INGEST_ prefix
    /// are applied on top, e.g. INGEST_SINK__PASSWORD=secret
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    // Load and validate configuration before any remote call
    let config = IngestConfig::load(cli.config.as_deref())?;
    config.validate()?;

    tracing::info!("Configuration loaded");

    let storage: Arc<dyn ObjectStorage> =
        Arc::new(S3Storage::new(&config.aws, &config.source)?);
    let sink: Arc<dyn RelationalSink> = Arc::new(MysqlSink::new(&config.sink));
    let catalog: Arc<dyn CatalogManager> = Arc::new(GlueCatalog::new(&config.aws).await?);

    let plan = IngestPlan::from_config(&config);
    let pipeline = IngestPipeline::new(storage, sink, catalog, plan);

    match pipeline.run().await? {
        RunOutcome::Loaded { rows } => {
            tracing::info!(rows, "ingest complete: relational load");
        }
        RunOutcome::FellBack { sink_error, .. } => {
            tracing::info!(
                sink_error = %sink_error,
                "ingest complete: catalog fallback"
            );
        }
    }

    Ok(())
}
