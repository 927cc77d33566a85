//! MySQL sink implementation using sqlx

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::ConnectOptions;
use tracing::debug;

use super::{RelationalSink, SinkError};
use crate::config::SinkConfig;
use crate::dataset::{Dataset, Value};

/// Build MySQL connection options from sink configuration.
/// Uses MySqlConnectOptions to avoid embedding credentials in a URL string.
fn build_connect_options(config: &SinkConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(config.host.as_deref().unwrap_or_default())
        .port(config.port.unwrap_or(3306))
        .username(config.user.as_deref().unwrap_or_default())
        .password(config.password.as_deref().unwrap_or_default())
        .database(config.database.as_deref().unwrap_or_default())
}

#[derive(Debug)]
pub struct MysqlSink {
    options: MySqlConnectOptions,
}

impl MysqlSink {
    /// Build a sink from validated configuration.
    pub fn new(config: &SinkConfig) -> Self {
        Self {
            options: build_connect_options(config),
        }
    }
}

/// Quote an identifier for MySQL.
fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[async_trait]
impl RelationalSink for MysqlSink {
    async fn replace_table(&self, table: &str, dataset: &Dataset) -> Result<u64, SinkError> {
        let mut conn: MySqlConnection = self.options.clone().connect().await?;

        let table_ident = quote_ident(table);

        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table_ident))
            .execute(&mut conn)
            .await?;

        let column_defs = dataset
            .columns
            .iter()
            .map(|col| format!("{} {}", quote_ident(&col.name), col.column_type.mysql_type()))
            .collect::<Vec<_>>()
            .join(", ");
        sqlx::query(&format!("CREATE TABLE {} ({})", table_ident, column_defs))
            .execute(&mut conn)
            .await?;
        debug!(table = %table, columns = dataset.columns.len(), "created sink table");

        if dataset.rows.is_empty() {
            return Ok(0);
        }

        let column_list = dataset
            .columns
            .iter()
            .map(|col| quote_ident(&col.name))
            .collect::<Vec<_>>()
            .join(", ");
        let row_placeholder = format!(
            "({})",
            vec!["?"; dataset.columns.len()].join(", ")
        );
        let placeholders = vec![row_placeholder; dataset.rows.len()].join(", ");
        let insert = format!(
            "INSERT INTO {} ({}) VALUES {}",
            table_ident, column_list, placeholders
        );

        let mut query = sqlx::query(&insert);
        for row in &dataset.rows {
            for value in row {
                query = match value {
                    Value::Integer(i) => query.bind(i),
                    Value::Text(s) => query.bind(s),
                };
            }
        }
        let result = query.execute(&mut conn).await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_backticks() {
        assert_eq!(quote_ident("students"), "`students`");
        assert_eq!(quote_ident("weird`name"), "`weird``name`");
    }

    #[test]
    fn connect_options_from_config() {
        let config = SinkConfig {
            host: Some("db.example.com".to_string()),
            port: Some(3307),
            user: Some("loader".to_string()),
            password: Some("pw".to_string()),
            database: Some("mydb".to_string()),
            table: Some("students".to_string()),
        };
        let options = build_connect_options(&config);
        assert_eq!(options.get_host(), "db.example.com");
        assert_eq!(options.get_port(), 3307);
        assert_eq!(options.get_username(), "loader");
        assert_eq!(options.get_database(), Some("mydb"));
    }
}
