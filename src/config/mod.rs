use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    pub aws: AwsConfig,
    pub source: SourceConfig,
    pub sink: SinkConfig,
    pub catalog: CatalogConfig,
}

/// Credential pair and region shared by object storage and the catalog.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AwsConfig {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub bucket: Option<String>,
    pub key: Option<String>,
    /// Custom endpoint for MinIO/S3-compatible storage. Optional.
    pub endpoint: Option<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    ",".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SinkConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub table: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub database: Option<String>,
    pub table: Option<String>,
    /// Storage location URI registered for the external table,
    /// e.g. "s3://my-bucket/".
    pub location: Option<String>,
}

impl IngestConfig {
    /// Load configuration from an optional file plus environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Add environment variables with prefix INGEST_
        // Example: INGEST_SINK__PASSWORD=secret
        builder = builder.add_source(
            config::Environment::with_prefix("INGEST")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration before any remote call is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.aws.access_key.is_none() {
            anyhow::bail!("Missing required config: aws.access_key");
        }
        if self.aws.secret_key.is_none() {
            anyhow::bail!("Missing required config: aws.secret_key");
        }
        if self.aws.region.is_none() {
            anyhow::bail!("Missing required config: aws.region");
        }
        if self.source.bucket.is_none() {
            anyhow::bail!("Missing required config: source.bucket");
        }
        if self.source.key.is_none() {
            anyhow::bail!("Missing required config: source.key");
        }
        if self.source.delimiter.as_bytes().len() != 1 {
            anyhow::bail!(
                "Invalid source.delimiter '{}': must be a single byte",
                self.source.delimiter
            );
        }
        if self.sink.host.is_none() {
            anyhow::bail!("Missing required config: sink.host");
        }
        if self.sink.port.is_none() {
            anyhow::bail!("Missing required config: sink.port");
        }
        if self.sink.user.is_none() {
            anyhow::bail!("Missing required config: sink.user");
        }
        if self.sink.password.is_none() {
            anyhow::bail!("Missing required config: sink.password");
        }
        if self.sink.database.is_none() {
            anyhow::bail!("Missing required config: sink.database");
        }
        if self.sink.table.is_none() {
            anyhow::bail!("Missing required config: sink.table");
        }
        if self.catalog.database.is_none() {
            anyhow::bail!("Missing required config: catalog.database");
        }
        if self.catalog.table.is_none() {
            anyhow::bail!("Missing required config: catalog.table");
        }
        if self.catalog.location.is_none() {
            anyhow::bail!("Missing required config: catalog.location");
        }
        Ok(())
    }

    /// Field delimiter as a single byte. Call after `validate()`.
    pub fn delimiter_byte(&self) -> u8 {
        self.source.delimiter.as_bytes()[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> IngestConfig {
        IngestConfig {
            aws: AwsConfig {
                access_key: Some("AKIA_TEST".to_string()),
                secret_key: Some("secret".to_string()),
                region: Some("us-east-1".to_string()),
            },
            source: SourceConfig {
                bucket: Some("my-bucket".to_string()),
                key: Some("students.csv".to_string()),
                endpoint: None,
                delimiter: ",".to_string(),
            },
            sink: SinkConfig {
                host: Some("localhost".to_string()),
                port: Some(3306),
                user: Some("root".to_string()),
                password: Some("pw".to_string()),
                database: Some("mydb".to_string()),
                table: Some("students".to_string()),
            },
            catalog: CatalogConfig {
                database: Some("glue_fallback_db".to_string()),
                table: Some("students_glue".to_string()),
                location: Some("s3://my-bucket/".to_string()),
            },
        }
    }

    #[test]
    fn validate_accepts_full_config() {
        assert!(full_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let mut config = full_config();
        config.aws.secret_key = None;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("aws.secret_key"), "got: {}", err);
    }

    #[test]
    fn validate_rejects_missing_sink_table() {
        let mut config = full_config();
        config.sink.table = None;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("sink.table"), "got: {}", err);
    }

    #[test]
    fn validate_rejects_multibyte_delimiter() {
        let mut config = full_config();
        config.source.delimiter = ",,".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn delimiter_byte_returns_configured_delimiter() {
        let mut config = full_config();
        config.source.delimiter = "|".to_string();
        assert_eq!(config.delimiter_byte(), b'|');
    }
}
