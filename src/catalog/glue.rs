//! AWS Glue Data Catalog backend.

use anyhow::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_glue::config::Credentials;
use aws_sdk_glue::error::ProvideErrorMetadata;
use aws_sdk_glue::types::{
    Column as GlueColumn, DatabaseInput, SerDeInfo, StorageDescriptor, TableInput,
};
use aws_sdk_glue::Client;
use tracing::debug;

use super::{CatalogEntry, CatalogError, CatalogManager, RegisterOutcome};
use crate::config::AwsConfig;

// Hive descriptors for delimited-text external tables
const TEXT_INPUT_FORMAT: &str = "org.apache.hadoop.mapred.TextInputFormat";
const TEXT_OUTPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat";
const LAZY_SIMPLE_SERDE: &str = "org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe";

#[derive(Debug)]
pub struct GlueCatalog {
    client: Client,
}

impl GlueCatalog {
    /// Build a Glue client from validated configuration.
    pub async fn new(aws: &AwsConfig) -> Result<Self> {
        let credentials = Credentials::new(
            aws.access_key.clone().unwrap_or_default(),
            aws.secret_key.clone().unwrap_or_default(),
            None,
            None,
            "ingest-config",
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(aws.region.clone().unwrap_or_default()))
            .credentials_provider(credentials)
            .load()
            .await;

        Ok(Self {
            client: Client::new(&sdk_config),
        })
    }
}

/// Map a Glue service error to the catalog error taxonomy.
fn classify<E>(operation: &str, err: &E) -> CatalogError
where
    E: ProvideErrorMetadata + std::fmt::Display,
{
    match err.code() {
        Some("AccessDeniedException") => {
            CatalogError::AccessDenied(format!("{}: {}", operation, err))
        }
        Some("InvalidInputException") => {
            CatalogError::InvalidEntry(format!("{}: {}", operation, err))
        }
        _ => CatalogError::Service(format!("{}: {}", operation, err)),
    }
}

#[async_trait]
impl CatalogManager for GlueCatalog {
    async fn ensure_database(&self, database: &str) -> Result<RegisterOutcome, CatalogError> {
        // Existence check first; a racing create is still tolerated below.
        match self.client.get_database().name(database).send().await {
            Ok(_) => return Ok(RegisterOutcome::AlreadyExists),
            Err(err) => {
                let err = err.into_service_error();
                if !err.is_entity_not_found_exception() {
                    return Err(classify("get database", &err));
                }
            }
        }

        let input = DatabaseInput::builder()
            .name(database)
            .build()
            .map_err(|e| CatalogError::InvalidEntry(e.to_string()))?;

        match self
            .client
            .create_database()
            .database_input(input)
            .send()
            .await
        {
            Ok(_) => Ok(RegisterOutcome::Created),
            Err(err) => {
                let err = err.into_service_error();
                if err.is_already_exists_exception() {
                    Ok(RegisterOutcome::AlreadyExists)
                } else {
                    Err(classify("create database", &err))
                }
            }
        }
    }

    async fn register_external_table(
        &self,
        entry: &CatalogEntry,
    ) -> Result<RegisterOutcome, CatalogError> {
        match self
            .client
            .get_table()
            .database_name(&entry.database)
            .name(&entry.table)
            .send()
            .await
        {
            Ok(_) => return Ok(RegisterOutcome::AlreadyExists),
            Err(err) => {
                let err = err.into_service_error();
                if !err.is_entity_not_found_exception() {
                    return Err(classify("get table", &err));
                }
            }
        }

        let columns = entry
            .columns
            .iter()
            .map(|col| {
                GlueColumn::builder()
                    .name(&col.name)
                    .r#type(col.column_type.catalog_type())
                    .build()
                    .map_err(|e| CatalogError::InvalidEntry(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let serde_info = SerDeInfo::builder()
            .serialization_library(LAZY_SIMPLE_SERDE)
            .parameters("field.delim", &entry.delimiter)
            .parameters("serialization.format", &entry.delimiter)
            .build();

        let storage_descriptor = StorageDescriptor::builder()
            .set_columns(Some(columns))
            .location(&entry.location)
            .input_format(TEXT_INPUT_FORMAT)
            .output_format(TEXT_OUTPUT_FORMAT)
            .serde_info(serde_info)
            .build();

        let table_input = TableInput::builder()
            .name(&entry.table)
            .table_type("EXTERNAL_TABLE")
            .parameters("classification", "csv")
            .parameters("skip.header.line.count", "1")
            .parameters("EXTERNAL", "TRUE")
            .storage_descriptor(storage_descriptor)
            .build()
            .map_err(|e| CatalogError::InvalidEntry(e.to_string()))?;

        match self
            .client
            .create_table()
            .database_name(&entry.database)
            .table_input(table_input)
            .send()
            .await
        {
            Ok(_) => {
                debug!(
                    database = %entry.database,
                    table = %entry.table,
                    location = %entry.location,
                    "registered external table"
                );
                Ok(RegisterOutcome::Created)
            }
            Err(err) => {
                let err = err.into_service_error();
                if err.is_already_exists_exception() {
                    Ok(RegisterOutcome::AlreadyExists)
                } else {
                    Err(classify("create table", &err))
                }
            }
        }
    }
}
